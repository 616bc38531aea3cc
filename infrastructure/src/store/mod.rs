//! Persistent stores
//!
//! SQLite adapters for the user and consultant repositories. Both share
//! one pool opened by [`connect`].

mod consultants;
mod sqlite;
mod users;

pub use consultants::SqliteConsultantStore;
pub use sqlite::{connect, init};
pub use users::SqliteUserStore;
