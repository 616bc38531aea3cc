//! Submit Reply use case
//!
//! Relays a consultant's reply to the user whose question it answers.

use crate::error::RoutingError;
use crate::ports::transport::{MessageAction, OutboundMessage, Recipient, Transport};
use crate::use_cases::assign_consultant::AssignmentPolicy;
use consult_domain::util::escape_html;
use consult_domain::{ReplyContext, UserId, extract_user_id};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A reply that reached its user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyRelayed {
    pub user_id: UserId,
}

pub struct SubmitReplyUseCase {
    assignment: Arc<AssignmentPolicy>,
    transport: Arc<dyn Transport>,
    reply_header: String,
}

impl SubmitReplyUseCase {
    pub fn new(
        assignment: Arc<AssignmentPolicy>,
        transport: Arc<dyn Transport>,
        reply_header: impl Into<String>,
    ) -> Self {
        Self {
            assignment,
            transport,
            reply_header: reply_header.into(),
        }
    }

    pub async fn execute(&self, context: ReplyContext) -> Result<ReplyRelayed, RoutingError> {
        let Some(user_id) = extract_user_id(&context) else {
            debug!(consultant_id = %context.consultant, "reply has no correlated user");
            return Err(RoutingError::CorrelationNotFound);
        };

        let body = format!(
            "{}\n\n---\n{}",
            self.reply_header,
            escape_html(&context.text)
        );
        let message = OutboundMessage::html(body).with_action(MessageAction::AskNewQuestion);
        let target = Recipient::User(user_id);
        if let Err(source) = self.transport.deliver(target, &message).await {
            warn!(
                consultant_id = %context.consultant,
                user_id = %user_id,
                error = %source,
                "reply delivery failed"
            );
            return Err(RoutingError::DeliveryFailed { target, source });
        }

        self.assignment
            .record_answered(context.consultant, &context.sender)
            .await?;

        info!(consultant_id = %context.consultant, user_id = %user_id, "reply relayed");
        Ok(ReplyRelayed { user_id })
    }
}
