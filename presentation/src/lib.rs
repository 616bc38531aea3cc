//! Presentation layer for consult-router
//!
//! This crate contains CLI definitions, message rendering and the
//! Telegram update front-end.

pub mod cli;
pub mod output;
pub mod telegram;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::report::{stats_console, stats_html};
pub use telegram::{InboundEvent, UpdateHandler, run_polling};
