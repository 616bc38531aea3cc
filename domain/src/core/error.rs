//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No consultants configured")]
    NoConsultants,

    #[error("Consultant {0} is listed more than once")]
    DuplicateConsultant(i64),

    #[error("Message limit must be at least 1")]
    InvalidMessageLimit,

    #[error("Invalid profile field: {0}")]
    InvalidProfile(String),
}

impl DomainError {
    /// Whether this error means the service cannot start with its current configuration.
    pub fn is_config_invalid(&self) -> bool {
        matches!(
            self,
            DomainError::NoConsultants
                | DomainError::DuplicateConsultant(_)
                | DomainError::InvalidMessageLimit
        )
    }
}

/// Errors raised by repository implementations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}
