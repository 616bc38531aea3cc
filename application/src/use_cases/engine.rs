//! Routing engine
//!
//! Wires the routing use cases over one set of ports so the presentation
//! layer holds a single handle.

use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::ports::clock::Clock;
use crate::ports::session_store::SessionStore;
use crate::ports::transport::Transport;
use crate::use_cases::assign_consultant::AssignmentPolicy;
use crate::use_cases::consultant_report::ConsultantReportUseCase;
use crate::use_cases::eligibility::{EligibilityChecker, RequestQuestionUseCase};
use crate::use_cases::onboarding::{OnboardingStep, OnboardingUseCase, StartOutcome};
use crate::use_cases::submit_question::{
    QuestionDispatched, SubmitQuestionInput, SubmitQuestionUseCase,
};
use crate::use_cases::submit_reply::{ReplyRelayed, SubmitReplyUseCase};
use consult_domain::{
    Consultant, ConsultantRepository, ConversationState, ReplyContext, StoreError, UserId,
    UserRepository,
};
use std::sync::Arc;

/// Adapters the engine runs on
#[derive(Clone)]
pub struct RoutingDeps {
    pub users: Arc<dyn UserRepository>,
    pub consultants: Arc<dyn ConsultantRepository>,
    pub transport: Arc<dyn Transport>,
    pub sessions: Arc<dyn SessionStore>,
    pub clock: Arc<dyn Clock>,
}

pub struct RoutingEngine {
    config: RoutingConfig,
    sessions: Arc<dyn SessionStore>,
    assignment: Arc<AssignmentPolicy>,
    onboarding: OnboardingUseCase,
    request_question: RequestQuestionUseCase,
    submit_question: SubmitQuestionUseCase,
    submit_reply: SubmitReplyUseCase,
    report: ConsultantReportUseCase,
}

impl RoutingEngine {
    pub fn new(config: RoutingConfig, deps: RoutingDeps) -> Self {
        let checker = Arc::new(EligibilityChecker::new(
            deps.users.clone(),
            deps.clock,
            config.quota,
        ));
        let assignment = Arc::new(AssignmentPolicy::new(
            deps.users.clone(),
            deps.consultants.clone(),
            config.roster.clone(),
        ));
        Self {
            onboarding: OnboardingUseCase::new(
                checker.clone(),
                deps.users.clone(),
                deps.sessions.clone(),
            ),
            request_question: RequestQuestionUseCase::new(checker.clone(), deps.sessions.clone()),
            submit_question: SubmitQuestionUseCase::new(
                checker,
                assignment.clone(),
                deps.users,
                deps.transport.clone(),
                deps.sessions.clone(),
                config.messages.reassigned.clone(),
            ),
            submit_reply: SubmitReplyUseCase::new(
                assignment.clone(),
                deps.transport,
                config.messages.reply_header.clone(),
            ),
            report: ConsultantReportUseCase::new(deps.consultants),
            sessions: deps.sessions,
            assignment,
            config,
        }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Startup work: consultant rows and cursor range.
    pub async fn prepare(&self) -> Result<(), StoreError> {
        self.assignment.prepare().await
    }

    pub fn session(&self, user_id: UserId) -> ConversationState {
        self.sessions.get(user_id)
    }

    pub async fn start(&self, user_id: UserId) -> Result<StartOutcome, RoutingError> {
        self.onboarding.start(user_id).await
    }

    pub async fn onboard(
        &self,
        user_id: UserId,
        input: &str,
    ) -> Result<OnboardingStep, RoutingError> {
        self.onboarding.advance(user_id, input).await
    }

    pub async fn request_question(&self, user_id: UserId) -> Result<(), RoutingError> {
        self.request_question.execute(user_id).await
    }

    pub async fn submit_question(
        &self,
        input: SubmitQuestionInput,
    ) -> Result<QuestionDispatched, RoutingError> {
        self.submit_question.execute(input).await
    }

    pub async fn submit_reply(&self, context: ReplyContext) -> Result<ReplyRelayed, RoutingError> {
        self.submit_reply.execute(context).await
    }

    pub async fn consultant_report(&self) -> Result<Vec<Consultant>, RoutingError> {
        self.report.execute().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::transport::Recipient;
    use crate::use_cases::testing::{
        FixedClock, MemoryConsultants, MemorySessions, MemoryUsers, MockTransport, month,
        registered,
    };
    use consult_domain::{Assignment, ConsultantId};

    struct Harness {
        engine: RoutingEngine,
        users: Arc<MemoryUsers>,
        consultants: Arc<MemoryConsultants>,
        transport: Arc<MockTransport>,
        clock: Arc<FixedClock>,
    }

    fn harness(roster: &[i64], limit: u32, users: Vec<consult_domain::User>) -> Harness {
        let users = Arc::new(MemoryUsers::with(users));
        let consultants = Arc::new(MemoryConsultants::default());
        let transport = Arc::new(MockTransport::default());
        let clock = Arc::new(FixedClock::new(month(6)));
        let config = RoutingConfig::new(
            roster.iter().copied().map(ConsultantId::new).collect(),
            limit,
        )
        .unwrap();
        let engine = RoutingEngine::new(
            config,
            RoutingDeps {
                users: users.clone(),
                consultants: consultants.clone(),
                transport: transport.clone(),
                sessions: Arc::new(MemorySessions::default()),
                clock: clock.clone(),
            },
        );
        Harness {
            engine,
            users,
            consultants,
            transport,
            clock,
        }
    }

    async fn ask(engine: &RoutingEngine, id: i64) -> Result<QuestionDispatched, RoutingError> {
        let user = UserId::new(id);
        engine.request_question(user).await?;
        assert_eq!(engine.session(user), ConversationState::AwaitingQuestion);
        engine
            .submit_question(SubmitQuestionInput::new(user, "Is this covered?"))
            .await
    }

    #[tokio::test]
    async fn test_monthly_limit_resets_in_next_month() {
        let h = harness(&[100], 2, vec![registered(1)]);

        assert_eq!(ask(&h.engine, 1).await.unwrap().remaining, 1);
        assert_eq!(ask(&h.engine, 1).await.unwrap().remaining, 0);
        assert!(matches!(
            ask(&h.engine, 1).await,
            Err(RoutingError::LimitReached)
        ));

        h.clock.set(month(7));
        let dispatched = ask(&h.engine, 1).await.unwrap();
        assert_eq!(dispatched.count, 1);
        assert_eq!(
            h.users.snapshot(UserId::new(1)).unwrap().last_message_month,
            Some(month(7))
        );
    }

    #[tokio::test]
    async fn test_new_users_rotate_through_roster() {
        let h = harness(
            &[100, 200, 300],
            2,
            vec![registered(1), registered(2), registered(3)],
        );
        h.engine.prepare().await.unwrap();

        let mut assigned = Vec::new();
        for id in 1..=3 {
            assigned.push(ask(&h.engine, id).await.unwrap().consultant.get());
        }

        assert_eq!(assigned, vec![100, 200, 300]);
        assert_eq!(h.consultants.cursor(), 0);
        for id in [100, 200, 300] {
            assert_eq!(h.consultants.snapshot(ConsultantId::new(id)).assigned_count, 1);
        }
    }

    #[tokio::test]
    async fn test_failed_delivery_consumes_nothing() {
        let h = harness(&[100], 2, vec![registered(1)]);
        h.transport.fail_for(100);

        let err = ask(&h.engine, 1).await.unwrap_err();
        assert!(matches!(
            err,
            RoutingError::DeliveryFailed {
                target: Recipient::Consultant(_),
                ..
            }
        ));

        let user = h.users.snapshot(UserId::new(1)).unwrap();
        assert_eq!(user.message_count, 0);
        assert_eq!(user.assignment, Assignment::Assigned(ConsultantId::new(100)));
        assert_eq!(h.consultants.snapshot(ConsultantId::new(100)).assigned_count, 0);
        assert!(h.engine.session(UserId::new(1)).is_idle());
    }

    #[tokio::test]
    async fn test_unregistered_user_is_blocked_before_awaiting() {
        let h = harness(&[100], 2, vec![]);

        assert!(matches!(
            h.engine.request_question(UserId::new(9)).await,
            Err(RoutingError::NotRegistered)
        ));
        assert!(h.engine.session(UserId::new(9)).is_idle());
        assert!(h.transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_report_lists_rostered_consultants() {
        let h = harness(&[300, 100], 2, vec![registered(1)]);
        h.engine.prepare().await.unwrap();
        ask(&h.engine, 1).await.unwrap();

        let report = h.engine.consultant_report().await.unwrap();
        let ids: Vec<i64> = report.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![100, 300]);
        assert_eq!(report[1].assigned_count, 1);
    }
}
