//! Telegram configuration from TOML (`[telegram]` section)

use super::validation::{ConfigIssue, ConfigIssueCode, ConfigValidationError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw Telegram configuration from TOML
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTelegramConfig {
    /// Bot API token; usually supplied as `CONSULT_TELEGRAM__TOKEN`
    pub token: Option<String>,
    /// Upper bound for a single delivery attempt
    pub request_timeout_seconds: u64,
}

impl Default for FileTelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            request_timeout_seconds: 30,
        }
    }
}

// Keep the token out of `--show-config` output and logs.
impl std::fmt::Debug for FileTelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileTelegramConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

impl FileTelegramConfig {
    pub fn require_token(&self) -> Result<&str, ConfigValidationError> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(ConfigValidationError::MissingToken)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn issues(&self) -> Vec<ConfigIssue> {
        if self.request_timeout_seconds == 0 {
            vec![ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "telegram.request_timeout_seconds: must be at least 1",
            )]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_missing() {
        let config = FileTelegramConfig {
            token: Some("  ".into()),
            ..Default::default()
        };
        assert!(matches!(
            config.require_token(),
            Err(ConfigValidationError::MissingToken)
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = FileTelegramConfig {
            token: Some("123:secret".into()),
            ..Default::default()
        };
        let shown = format!("{config:?}");
        assert!(!shown.contains("secret"));
        assert!(shown.contains("<redacted>"));
    }
}
