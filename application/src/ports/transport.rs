//! Transport port
//!
//! The only I/O primitive the routing core depends on: deliver one message
//! to one chat. Each call is a single pass/fail attempt bounded by the
//! adapter's own timeout; retrying is left to the caller.

use async_trait::async_trait;
use consult_domain::{ConsultantId, UserId};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while delivering a message
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Recipient unreachable: {0}")]
    Unreachable(String),

    #[error("Message rejected: {0}")]
    Rejected(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Who a message is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipient {
    User(UserId),
    Consultant(ConsultantId),
}

impl Recipient {
    /// Numeric chat id understood by the transport.
    pub fn chat_id(&self) -> i64 {
        match self {
            Recipient::User(id) => id.get(),
            Recipient::Consultant(id) => id.get(),
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipient::User(id) => write!(f, "user {id}"),
            Recipient::Consultant(id) => write!(f, "consultant {id}"),
        }
    }
}

/// Interactive affordances a message may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAction {
    /// Button that starts a new question.
    AskNewQuestion,
}

impl MessageAction {
    /// Callback payload the transport attaches to the button.
    pub const ASK_NEW_QUESTION_DATA: &'static str = "ask_new_question";

    pub fn callback_data(&self) -> &'static str {
        match self {
            MessageAction::AskNewQuestion => Self::ASK_NEW_QUESTION_DATA,
        }
    }
}

/// An HTML-formatted outbound chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub html: String,
    pub actions: Vec<MessageAction>,
}

impl OutboundMessage {
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: MessageAction) -> Self {
        self.actions.push(action);
        self
    }
}

/// Outbound message delivery
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn deliver(
        &self,
        recipient: Recipient,
        message: &OutboundMessage,
    ) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_display_and_chat_id() {
        let user = Recipient::User(UserId::new(12));
        let consultant = Recipient::Consultant(ConsultantId::new(-34));
        assert_eq!(user.to_string(), "user 12");
        assert_eq!(consultant.chat_id(), -34);
    }

    #[test]
    fn test_message_builder() {
        let msg = OutboundMessage::html("<b>hi</b>").with_action(MessageAction::AskNewQuestion);
        assert_eq!(msg.actions, vec![MessageAction::AskNewQuestion]);
        assert_eq!(msg.actions[0].callback_data(), "ask_new_question");
    }
}
