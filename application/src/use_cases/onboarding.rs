//! Onboarding use case
//!
//! Collects full name, phone and city one message at a time. The routing
//! core only needs the stored full name; the other fields are forwarded
//! with each question.

use crate::error::RoutingError;
use crate::ports::session_store::SessionStore;
use crate::use_cases::eligibility::EligibilityChecker;
use consult_domain::{
    ConversationState, Eligibility, Profile, UserId, UserRepository, validate_city,
    validate_full_name, validate_phone,
};
use std::sync::Arc;
use tracing::{debug, info};

/// What `/start` resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// Registered and still has quota this month.
    WelcomeBack { name: String },
    /// Registered but this month's quota is used up.
    LimitReached,
    /// No profile yet; the user is now asked for their full name.
    NeedsProfile,
}

/// Profile fields collected during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FullName,
    Phone,
    City,
}

/// Result of feeding one message into the onboarding dialogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingStep {
    /// The value was accepted; ask for this field next.
    Next(ProfileField),
    /// The value was rejected; ask for the same field again.
    Rejected(ProfileField),
    /// Profile stored; the user may now type a question.
    Completed,
    /// The user is not onboarding.
    NotOnboarding,
}

pub struct OnboardingUseCase {
    checker: Arc<EligibilityChecker>,
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
}

impl OnboardingUseCase {
    pub fn new(
        checker: Arc<EligibilityChecker>,
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            checker,
            users,
            sessions,
        }
    }

    /// Handle `/start` from a regular user.
    pub async fn start(&self, user_id: UserId) -> Result<StartOutcome, RoutingError> {
        let checked = self.checker.check(user_id).await?;
        let outcome = match checked.eligibility {
            Eligibility::NotRegistered => {
                self.sessions
                    .set(user_id, ConversationState::AwaitingFullName);
                StartOutcome::NeedsProfile
            }
            Eligibility::LimitReached => StartOutcome::LimitReached,
            Eligibility::Ok => StartOutcome::WelcomeBack {
                name: checked.user.display_name().to_string(),
            },
        };
        debug!(user_id = %user_id, ?outcome, "start handled");
        Ok(outcome)
    }

    /// Feed one text message into the onboarding dialogue.
    pub async fn advance(
        &self,
        user_id: UserId,
        input: &str,
    ) -> Result<OnboardingStep, RoutingError> {
        let step = match self.sessions.get(user_id) {
            ConversationState::AwaitingFullName => match validate_full_name(input) {
                Ok(full_name) => {
                    self.sessions
                        .set(user_id, ConversationState::AwaitingPhone { full_name });
                    OnboardingStep::Next(ProfileField::Phone)
                }
                Err(_) => OnboardingStep::Rejected(ProfileField::FullName),
            },
            ConversationState::AwaitingPhone { full_name } => match validate_phone(input) {
                Ok(phone) => {
                    self.sessions
                        .set(user_id, ConversationState::AwaitingCity { full_name, phone });
                    OnboardingStep::Next(ProfileField::City)
                }
                Err(_) => OnboardingStep::Rejected(ProfileField::Phone),
            },
            ConversationState::AwaitingCity { full_name, phone } => match validate_city(input) {
                Ok(city) => {
                    let profile = Profile::new(full_name, phone, city);
                    self.users.update_profile(user_id, &profile).await?;
                    self.sessions
                        .set(user_id, ConversationState::AwaitingQuestion);
                    info!(user_id = %user_id, "profile registered");
                    OnboardingStep::Completed
                }
                Err(_) => OnboardingStep::Rejected(ProfileField::City),
            },
            ConversationState::Idle | ConversationState::AwaitingQuestion => {
                OnboardingStep::NotOnboarding
            }
        };
        Ok(step)
    }
}
