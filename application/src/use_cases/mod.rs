//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod assign_consultant;
pub mod consultant_report;
pub mod eligibility;
pub mod engine;
pub mod onboarding;
pub mod submit_question;
pub mod submit_reply;

#[cfg(test)]
pub(crate) mod testing;
