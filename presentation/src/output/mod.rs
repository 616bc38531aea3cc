//! Rendering of user-visible output
//!
//! - [`messages`] turns use case outcomes into chat messages
//! - [`report`] renders the consultant report for chat and terminal

pub mod messages;
pub mod report;
