//! Infrastructure layer for consult-router
//!
//! This crate contains adapters that implement the ports defined in the
//! domain and application layers, including configuration file loading.

pub mod config;
pub mod session;
pub mod store;
pub mod telegram;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigIssueCode, ConfigLoader, ConfigValidationError, FileConfig, Severity,
};
pub use session::InMemorySessionStore;
pub use store::{SqliteConsultantStore, SqliteUserStore};
pub use telegram::{TelegramTransport, build_bot};
