//! Application-level configuration.
//!
//! - [`RoutingConfig`] - validated roster, quota and owner settings
//! - [`MessageTemplates`] - user-visible texts, opaque to the routing core

pub mod messages;
pub mod routing_config;

pub use messages::MessageTemplates;
pub use routing_config::RoutingConfig;
