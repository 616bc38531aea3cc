//! Per-conversation dialogue state.
//!
//! The routing core only owns [`ConversationState::AwaitingQuestion`];
//! the onboarding states feed into `Idle` ahead of it.

use serde::{Deserialize, Serialize};

/// Where a user is in the chat dialogue
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingFullName,
    AwaitingPhone {
        full_name: String,
    },
    AwaitingCity {
        full_name: String,
        phone: String,
    },
    AwaitingQuestion,
}

impl ConversationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, ConversationState::Idle)
    }

    pub fn is_onboarding(&self) -> bool {
        matches!(
            self,
            ConversationState::AwaitingFullName
                | ConversationState::AwaitingPhone { .. }
                | ConversationState::AwaitingCity { .. }
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::Idle => "idle",
            ConversationState::AwaitingFullName => "awaiting_full_name",
            ConversationState::AwaitingPhone { .. } => "awaiting_phone",
            ConversationState::AwaitingCity { .. } => "awaiting_city",
            ConversationState::AwaitingQuestion => "awaiting_question",
        }
    }
}
