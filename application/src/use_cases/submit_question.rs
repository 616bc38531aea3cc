//! Submit Question use case
//!
//! Dispatches the question a user typed while `AwaitingQuestion` to their
//! consultant. Quota is consumed only once delivery succeeds, and the
//! conversation returns to `Idle` on every exit path.

use crate::error::RoutingError;
use crate::ports::session_store::{SessionReset, SessionStore};
use crate::ports::transport::{OutboundMessage, Recipient, Transport};
use crate::use_cases::assign_consultant::AssignmentPolicy;
use crate::use_cases::eligibility::EligibilityChecker;
use consult_domain::{ConsultantId, OutboundQuestion, SenderMeta, UserId, UserRepository};
use std::sync::Arc;
use tracing::{info, warn};

/// Input for the SubmitQuestion use case
#[derive(Debug, Clone)]
pub struct SubmitQuestionInput {
    pub user_id: UserId,
    pub text: String,
    pub sender: SenderMeta,
}

impl SubmitQuestionInput {
    pub fn new(user_id: UserId, text: impl Into<String>) -> Self {
        Self {
            user_id,
            text: text.into(),
            sender: SenderMeta::default(),
        }
    }

    pub fn with_sender(mut self, sender: SenderMeta) -> Self {
        self.sender = sender;
        self
    }
}

/// A question that reached its consultant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionDispatched {
    pub consultant: ConsultantId,
    /// Questions sent this month, including this one.
    pub count: u32,
    pub remaining: u32,
    pub reassigned_from: Option<ConsultantId>,
}

pub struct SubmitQuestionUseCase {
    checker: Arc<EligibilityChecker>,
    assignment: Arc<AssignmentPolicy>,
    users: Arc<dyn UserRepository>,
    transport: Arc<dyn Transport>,
    sessions: Arc<dyn SessionStore>,
    reassigned_notice: String,
}

impl SubmitQuestionUseCase {
    pub fn new(
        checker: Arc<EligibilityChecker>,
        assignment: Arc<AssignmentPolicy>,
        users: Arc<dyn UserRepository>,
        transport: Arc<dyn Transport>,
        sessions: Arc<dyn SessionStore>,
        reassigned_notice: impl Into<String>,
    ) -> Self {
        Self {
            checker,
            assignment,
            users,
            transport,
            sessions,
            reassigned_notice: reassigned_notice.into(),
        }
    }

    pub async fn execute(
        &self,
        input: SubmitQuestionInput,
    ) -> Result<QuestionDispatched, RoutingError> {
        let _reset = SessionReset::new(self.sessions.as_ref(), input.user_id);

        // Re-check: time may have passed since the user asked to submit.
        let (mut user, month) = self.checker.check(input.user_id).await?.require_ok()?;

        let resolution = self.assignment.resolve(&mut user).await?;
        if let Some(previous) = resolution.reassigned_from {
            info!(
                user_id = %user.id,
                previous = %previous,
                consultant_id = %resolution.consultant,
                "consultant reassigned"
            );
            let notice = OutboundMessage::html(self.reassigned_notice.clone());
            if let Err(e) = self
                .transport
                .deliver(Recipient::User(user.id), &notice)
                .await
            {
                warn!(user_id = %user.id, error = %e, "could not deliver reassignment notice");
            }
        }

        let question = OutboundQuestion {
            user_id: user.id,
            full_name: user.profile.full_name.clone().unwrap_or_default(),
            phone: user.profile.phone.clone().unwrap_or_default(),
            city: user.profile.city.clone().unwrap_or_default(),
            handle: input.sender.handle.clone(),
            text: input.text,
        };
        let target = Recipient::Consultant(resolution.consultant);
        if let Err(source) = self
            .transport
            .deliver(target, &OutboundMessage::html(question.to_html()))
            .await
        {
            warn!(
                user_id = %user.id,
                consultant_id = %resolution.consultant,
                error = %source,
                "question delivery failed, quota not consumed"
            );
            return Err(RoutingError::DeliveryFailed { target, source });
        }

        self.assignment.record_assigned(resolution.consultant).await?;
        let quota = self.checker.quota();
        let count = quota.record_question_sent(&mut user, month);
        self.users.save(&user).await?;
        let remaining = quota.remaining(count);

        info!(
            user_id = %user.id,
            consultant_id = %resolution.consultant,
            %month,
            count,
            remaining,
            "question dispatched"
        );
        Ok(QuestionDispatched {
            consultant: resolution.consultant,
            count,
            remaining,
            reassigned_from: resolution.reassigned_from,
        })
    }
}
