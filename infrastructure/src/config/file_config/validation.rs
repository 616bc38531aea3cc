//! Structured configuration issues.

use consult_domain::DomainError;
use thiserror::Error;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the service cannot start with this configuration.
    Error,
    /// Non-fatal: the service starts but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `routing.consultants` is empty.
    EmptyRoster,
    /// A consultant id appears more than once in `routing.consultants`.
    DuplicateConsultant { id: i64 },
    /// `routing.message_limit` is zero.
    ZeroMessageLimit,
    /// `telegram.request_timeout_seconds` is zero.
    ZeroTimeout,
    /// `routing.owner_id` is also a consultant; `/start` greets them as owner.
    OwnerIsConsultant { id: i64 },
    /// A message template is blank.
    EmptyTemplate { field: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Configuration that cannot be turned into a running service.
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("invalid configuration: {}", .0.iter().map(|i| i.message.as_str()).collect::<Vec<_>>().join("; "))]
    Invalid(Vec<ConfigIssue>),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("no bot token configured (set [telegram] token or CONSULT_TELEGRAM__TOKEN)")]
    MissingToken,
}
