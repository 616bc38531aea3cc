//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use application types where appropriate.

mod routing;
mod storage;
mod telegram;
mod validation;

pub use routing::FileRoutingConfig;
pub use storage::FileStorageConfig;
pub use telegram::FileTelegramConfig;
pub use validation::{ConfigIssue, ConfigIssueCode, ConfigValidationError, Severity};

use consult_application::{MessageTemplates, RoutingConfig};
use consult_domain::{ConsultantId, UserId};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Quota, roster and owner
    pub routing: FileRoutingConfig,
    /// User-visible texts
    pub messages: MessageTemplates,
    /// Database location
    pub storage: FileStorageConfig,
    /// Bot token and delivery timeout
    pub telegram: FileTelegramConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// The bot token is checked separately by
    /// [`FileTelegramConfig::require_token`] since `--stats` runs without it.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.routing.issues();
        issues.extend(self.telegram.issues());
        issues.extend(self.template_issues());
        issues
    }

    fn template_issues(&self) -> Vec<ConfigIssue> {
        let Ok(toml::Value::Table(table)) = toml::Value::try_from(&self.messages) else {
            return Vec::new();
        };
        table
            .into_iter()
            .filter(|(_, value)| value.as_str().is_some_and(|s| s.trim().is_empty()))
            .map(|(field, _)| {
                let message = format!("messages.{field}: template is empty");
                ConfigIssue::warning(ConfigIssueCode::EmptyTemplate { field }, message)
            })
            .collect()
    }

    /// Build the validated routing configuration, failing on any
    /// error-severity issue.
    pub fn routing_config(&self) -> Result<RoutingConfig, ConfigValidationError> {
        let errors: Vec<ConfigIssue> = self
            .validate()
            .into_iter()
            .filter(ConfigIssue::is_error)
            .collect();
        if !errors.is_empty() {
            return Err(ConfigValidationError::Invalid(errors));
        }

        let consultants = self
            .routing
            .consultants
            .iter()
            .copied()
            .map(ConsultantId::new)
            .collect();
        let config = RoutingConfig::new(consultants, self.routing.message_limit)?
            .with_owner(self.routing.owner_id.map(UserId::new))
            .with_messages(self.messages.clone());
        Ok(config)
    }
}
