//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};

/// Raw storage configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// SQLite database file, or `:memory:`
    pub database: String,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            database: "consult-router.db".to_string(),
        }
    }
}
