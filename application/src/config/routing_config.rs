//! Validated routing configuration.

use crate::config::messages::MessageTemplates;
use consult_domain::{ConsultantId, ConsultantRoster, DomainError, QuotaPolicy, UserId};

/// Everything the routing use cases need from configuration.
///
/// Construction fails on an empty roster or a zero message limit, so a
/// `RoutingConfig` always describes a service that can start.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    pub roster: ConsultantRoster,
    pub quota: QuotaPolicy,
    pub owner: Option<UserId>,
    pub messages: MessageTemplates,
}

impl RoutingConfig {
    pub fn new(consultants: Vec<ConsultantId>, message_limit: u32) -> Result<Self, DomainError> {
        Ok(Self {
            roster: ConsultantRoster::new(consultants)?,
            quota: QuotaPolicy::new(message_limit)?,
            owner: None,
            messages: MessageTemplates::default(),
        })
    }

    pub fn with_owner(mut self, owner: Option<UserId>) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_messages(mut self, messages: MessageTemplates) -> Self {
        self.messages = messages;
        self
    }

    pub fn is_consultant(&self, chat_id: i64) -> bool {
        self.roster.contains(ConsultantId::new(chat_id))
    }

    pub fn is_owner(&self, chat_id: i64) -> bool {
        self.owner.is_some_and(|owner| owner.get() == chat_id)
    }
}
