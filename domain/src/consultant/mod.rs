//! Consultant subdomain.
//!
//! - [`entities::Consultant`]: identity and running counters
//! - [`entities::ConsultantRoster`]: the ordered, non-empty active list
//! - [`assignment`]: sticky binding and round-robin rotation
//! - [`repository::ConsultantRepository`]: trait for consultant persistence

pub mod assignment;
pub mod entities;
pub mod repository;
