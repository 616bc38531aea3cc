//! Telegram front-end
//!
//! [`inbound`] maps raw updates to [`InboundEvent`]s, [`handler`] runs them
//! against the routing engine, and [`polling`] drives the update loop.

pub mod handler;
pub mod inbound;
pub mod polling;

pub use handler::UpdateHandler;
pub use inbound::{Command, InboundEvent, Sender};
pub use polling::{BOT_COMMANDS, run_polling};
