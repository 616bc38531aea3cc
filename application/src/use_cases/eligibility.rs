//! Quota eligibility.
//!
//! [`EligibilityChecker`] is the single implementation of the monthly quota
//! check. It runs when a user asks to submit a question
//! ([`RequestQuestionUseCase`]) and again right before dispatch
//! ([`SubmitQuestionUseCase`](super::submit_question::SubmitQuestionUseCase)).

use crate::error::RoutingError;
use crate::ports::clock::Clock;
use crate::ports::session_store::SessionStore;
use consult_domain::{
    BillingMonth, ConversationState, Eligibility, QuotaPolicy, StoreError, User, UserId,
    UserRepository,
};
use std::sync::Arc;
use tracing::debug;

/// A user loaded for a quota decision, with the month the decision applies to.
#[derive(Debug, Clone)]
pub struct CheckedUser {
    pub user: User,
    pub month: BillingMonth,
    pub eligibility: Eligibility,
}

impl CheckedUser {
    /// Turn a blocked check into the matching [`RoutingError`].
    pub fn require_ok(self) -> Result<(User, BillingMonth), RoutingError> {
        match self.eligibility {
            Eligibility::Ok => Ok((self.user, self.month)),
            Eligibility::NotRegistered => Err(RoutingError::NotRegistered),
            Eligibility::LimitReached => Err(RoutingError::LimitReached),
        }
    }
}

pub struct EligibilityChecker {
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    quota: QuotaPolicy,
}

impl EligibilityChecker {
    pub fn new(users: Arc<dyn UserRepository>, clock: Arc<dyn Clock>, quota: QuotaPolicy) -> Self {
        Self {
            users,
            clock,
            quota,
        }
    }

    pub fn quota(&self) -> QuotaPolicy {
        self.quota
    }

    /// Load (or create) the user and evaluate the quota for the current month.
    pub async fn check(&self, user_id: UserId) -> Result<CheckedUser, StoreError> {
        let user = self.users.get_or_create(user_id).await?;
        let month = self.clock.current_month();
        let eligibility = self.quota.check(&user, month);
        debug!(
            user_id = %user_id,
            %month,
            count = self.quota.effective_count(&user, month),
            ?eligibility,
            "quota checked"
        );
        Ok(CheckedUser {
            user,
            month,
            eligibility,
        })
    }
}

/// Use case: a user signals they want to ask a question.
///
/// On success the conversation moves to `AwaitingQuestion`.
pub struct RequestQuestionUseCase {
    checker: Arc<EligibilityChecker>,
    sessions: Arc<dyn SessionStore>,
}

impl RequestQuestionUseCase {
    pub fn new(checker: Arc<EligibilityChecker>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { checker, sessions }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<(), RoutingError> {
        self.checker.check(user_id).await?.require_ok()?;
        self.sessions
            .set(user_id, ConversationState::AwaitingQuestion);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::{FixedClock, MemorySessions, MemoryUsers, month, registered};

    fn checker(users: Arc<MemoryUsers>, clock: Arc<FixedClock>) -> Arc<EligibilityChecker> {
        Arc::new(EligibilityChecker::new(
            users,
            clock,
            QuotaPolicy::new(2).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_unknown_user_is_created_unregistered() {
        let users = Arc::new(MemoryUsers::default());
        let checker = checker(users.clone(), Arc::new(FixedClock::new(month(6))));

        let checked = checker.check(UserId::new(1)).await.unwrap();
        assert_eq!(checked.eligibility, Eligibility::NotRegistered);
        assert!(users.snapshot(UserId::new(1)).is_some());
    }

    #[tokio::test]
    async fn test_request_enters_awaiting_question() {
        let users = Arc::new(MemoryUsers::with(vec![registered(1)]));
        let sessions = Arc::new(MemorySessions::default());
        let use_case = RequestQuestionUseCase::new(
            checker(users, Arc::new(FixedClock::new(month(6)))),
            sessions.clone(),
        );

        use_case.execute(UserId::new(1)).await.unwrap();
        assert_eq!(
            sessions.get(UserId::new(1)),
            ConversationState::AwaitingQuestion
        );
    }

    #[tokio::test]
    async fn test_request_blocked_at_limit_stays_idle() {
        let mut user = registered(1);
        user.message_count = 2;
        user.last_message_month = Some(month(6));
        let users = Arc::new(MemoryUsers::with(vec![user]));
        let sessions = Arc::new(MemorySessions::default());
        let use_case = RequestQuestionUseCase::new(
            checker(users, Arc::new(FixedClock::new(month(6)))),
            sessions.clone(),
        );

        let err = use_case.execute(UserId::new(1)).await.unwrap_err();
        assert!(matches!(err, RoutingError::LimitReached));
        assert!(sessions.get(UserId::new(1)).is_idle());
    }

    #[tokio::test]
    async fn test_request_requires_registration() {
        let users = Arc::new(MemoryUsers::default());
        let use_case = RequestQuestionUseCase::new(
            checker(users, Arc::new(FixedClock::new(month(6)))),
            Arc::new(MemorySessions::default()),
        );

        let err = use_case.execute(UserId::new(3)).await.unwrap_err();
        assert!(matches!(err, RoutingError::NotRegistered));
    }
}
