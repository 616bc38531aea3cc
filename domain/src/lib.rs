//! Domain layer for consult-router
//!
//! This crate contains the routing rules, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Quota
//!
//! Each registered user may send a fixed number of questions per calendar
//! month. A stored count from an earlier month counts as zero.
//!
//! ## Assignment
//!
//! A user is bound to one consultant on their first question (round-robin
//! over the roster) and keeps that consultant until it leaves the roster.
//!
//! ## Reply Correlation
//!
//! Forwarded questions carry the asker's id on a labelled line, so a
//! consultant's reply to that message can be routed back.

pub mod consultant;
pub mod conversation;
pub mod core;
pub mod correlation;
pub mod user;
pub mod util;

// Re-export commonly used types
pub use consultant::{
    assignment::{Assignment, AssignmentCheck, RotationCursor},
    entities::{Consultant, ConsultantRoster},
    repository::ConsultantRepository,
};
pub use conversation::ConversationState;
pub use core::{
    error::{DomainError, StoreError},
    ids::{ConsultantId, UserId},
    month::BillingMonth,
};
pub use correlation::{
    OutboundQuestion, RepliedMessage, ReplyContext, SenderMeta, USER_ID_LABEL, extract_user_id,
    parse_user_id_field,
};
pub use user::{
    entities::{Profile, User},
    onboarding::{validate_city, validate_full_name, validate_phone},
    quota::{Eligibility, QuotaPolicy},
    repository::UserRepository,
};
