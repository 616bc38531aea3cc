//! Configuration file loading for consult-router
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CONSULT_` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./consult.toml` or `./.consult.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/consult-router/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, ConfigIssueCode, ConfigValidationError, FileConfig, FileRoutingConfig,
    FileStorageConfig, FileTelegramConfig, Severity,
};
pub use loader::ConfigLoader;
