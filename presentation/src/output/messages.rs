//! Chat messages for use case outcomes.
//!
//! Pure functions over [`MessageTemplates`]; the Telegram handler decides
//! where they go.

use consult_application::{
    MessageAction, MessageTemplates, OnboardingStep, OutboundMessage, ProfileField,
    QuestionDispatched, RoutingError, StartOutcome,
};

fn text(template: &str) -> OutboundMessage {
    OutboundMessage::html(template)
}

fn with_ask_button(template: impl Into<String>) -> OutboundMessage {
    OutboundMessage::html(template).with_action(MessageAction::AskNewQuestion)
}

/// Messages answering `/start` from a regular user.
pub fn start(templates: &MessageTemplates, outcome: &StartOutcome) -> Vec<OutboundMessage> {
    match outcome {
        StartOutcome::NeedsProfile => {
            vec![text(&templates.welcome), text(&templates.ask_full_name)]
        }
        StartOutcome::WelcomeBack { name } => vec![with_ask_button(MessageTemplates::fill(
            &templates.welcome_back,
            &[("name", &consult_domain::util::escape_html(name))],
        ))],
        StartOutcome::LimitReached => vec![text(&templates.limit_reached)],
    }
}

/// The prompt after one onboarding input, if any.
pub fn onboarding(templates: &MessageTemplates, step: &OnboardingStep) -> Option<OutboundMessage> {
    let template = match step {
        OnboardingStep::Next(ProfileField::FullName) => &templates.ask_full_name,
        OnboardingStep::Next(ProfileField::Phone) => &templates.ask_phone,
        OnboardingStep::Next(ProfileField::City) => &templates.ask_city,
        OnboardingStep::Rejected(ProfileField::FullName) => &templates.invalid_full_name,
        OnboardingStep::Rejected(ProfileField::Phone) => &templates.invalid_phone,
        OnboardingStep::Rejected(ProfileField::City) => &templates.invalid_city,
        OnboardingStep::Completed => &templates.profile_saved,
        OnboardingStep::NotOnboarding => return None,
    };
    Some(text(template))
}

/// Confirmation plus the remaining-quota notice after a dispatched question.
pub fn dispatched(
    templates: &MessageTemplates,
    outcome: &QuestionDispatched,
) -> Vec<OutboundMessage> {
    let follow_up = if outcome.remaining > 0 {
        MessageTemplates::fill(
            &templates.remaining,
            &[("remaining", &outcome.remaining.to_string())],
        )
    } else {
        templates.limit_reached.clone()
    };
    vec![text(&templates.question_sent), with_ask_button(follow_up)]
}

/// The message shown to a user whose request was blocked or failed.
pub fn user_error(templates: &MessageTemplates, error: &RoutingError) -> OutboundMessage {
    match error {
        RoutingError::NotRegistered => text(&templates.not_registered),
        RoutingError::LimitReached => with_ask_button(templates.limit_reached.clone()),
        RoutingError::DeliveryFailed { .. } => text(&templates.delivery_failed),
        RoutingError::CorrelationNotFound | RoutingError::Store(_) => {
            text(&templates.internal_error)
        }
    }
}

/// The message shown to a consultant after a reply attempt failed.
pub fn consultant_error(templates: &MessageTemplates, error: &RoutingError) -> OutboundMessage {
    match error {
        RoutingError::CorrelationNotFound => text(&templates.correlation_not_found),
        RoutingError::DeliveryFailed { target, .. } => text(&MessageTemplates::fill(
            &templates.reply_failed,
            &[("user_id", &target.chat_id().to_string())],
        )),
        _ => text(&templates.internal_error),
    }
}
