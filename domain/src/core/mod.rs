//! Core domain concepts shared across all subdomains.
//!
//! - [`ids::UserId`] / [`ids::ConsultantId`]: chat-level identities
//! - [`month::BillingMonth`]: the calendar month a quota applies to
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod ids;
pub mod month;
