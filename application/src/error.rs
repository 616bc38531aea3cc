//! Routing error taxonomy
//!
//! Every variant except [`RoutingError::Store`] is an expected per-request
//! outcome that the front-end turns into a message for whoever triggered it.

use crate::ports::transport::{Recipient, TransportError};
use consult_domain::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("User has not completed registration")]
    NotRegistered,

    #[error("Monthly message limit reached")]
    LimitReached,

    #[error("Delivery to {target} failed: {source}")]
    DeliveryFailed {
        target: Recipient,
        #[source]
        source: TransportError,
    },

    #[error("Reply does not reference a forwarded question")]
    CorrelationNotFound,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl RoutingError {
    /// Whether this is a user-caused outcome rather than a system fault.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, RoutingError::Store(_))
    }
}
