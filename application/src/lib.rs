//! Application layer for consult-router
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod error;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{MessageTemplates, RoutingConfig};
pub use error::RoutingError;
pub use ports::{
    clock::{Clock, SystemClock},
    session_store::{SessionReset, SessionStore},
    transport::{MessageAction, OutboundMessage, Recipient, Transport, TransportError},
};
pub use use_cases::engine::{RoutingDeps, RoutingEngine};
pub use use_cases::onboarding::{OnboardingStep, ProfileField, StartOutcome};
pub use use_cases::submit_question::{QuestionDispatched, SubmitQuestionInput};
pub use use_cases::submit_reply::ReplyRelayed;
