//! End-user subdomain.
//!
//! - [`entities::User`]: profile, quota counters and consultant binding
//! - [`quota::QuotaPolicy`]: monthly eligibility and quota consumption
//! - [`onboarding`]: validation of the profile fields collected at `/start`
//! - [`repository::UserRepository`]: trait for user persistence

pub mod entities;
pub mod onboarding;
pub mod quota;
pub mod repository;
