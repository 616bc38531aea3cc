//! User-visible message templates.
//!
//! Templates are HTML and opaque to the routing core. Placeholders
//! (`{name}`, `{remaining}`, `{user_id}`) are filled by [`MessageTemplates::fill`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    pub welcome: String,
    pub welcome_back: String,
    pub ask_full_name: String,
    pub invalid_full_name: String,
    pub ask_phone: String,
    pub invalid_phone: String,
    pub ask_city: String,
    pub invalid_city: String,
    pub profile_saved: String,
    pub ask_question: String,
    pub not_registered: String,
    pub limit_reached: String,
    pub reassigned: String,
    pub question_sent: String,
    pub remaining: String,
    pub delivery_failed: String,
    pub reply_header: String,
    pub reply_sent: String,
    pub reply_failed: String,
    pub correlation_not_found: String,
    pub consultant_greeting: String,
    pub owner_greeting: String,
    pub stats_header: String,
    pub stats_empty: String,
    pub ask_button: String,
    pub internal_error: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            welcome: "Hello! Welcome to the consultation service. 👋".into(),
            welcome_back: "Hello {name}, welcome back! 👋".into(),
            ask_full_name: "Please send your first and last name:".into(),
            invalid_full_name:
                "❌ That name is not valid.\n\nPlease enter your first and last name (letters and one space)."
                    .into(),
            ask_phone: "Thank you. Now please send your phone number:".into(),
            invalid_phone:
                "❌ That phone number is not valid.\n\nPlease use the format 09123456789.".into(),
            ask_city: "Great. Now please enter your city:".into(),
            invalid_city: "❌ Please enter a valid city name.".into(),
            profile_saved:
                "Your details were saved. ✅\nYou can now type and send your question.".into(),
            ask_question: "Please type and send your question:".into(),
            not_registered: "You have not registered yet. Please use /start first.".into(),
            limit_reached: "⚠️ You have used all of your consultation messages for this month."
                .into(),
            reassigned:
                "Note: your previous consultant is no longer available. You have been connected to a new consultant."
                    .into(),
            question_sent:
                "✅ Your question was sent to a consultant.\nConsultants answer within 24 hours."
                    .into(),
            remaining: "You can ask {remaining} more question(s) this month.".into(),
            delivery_failed:
                "❌ Sorry, your message could not be delivered to the consultant.".into(),
            reply_header: "✉️ Reply from your consultant:".into(),
            reply_sent: "✅ Your reply was delivered to the user.".into(),
            reply_failed: "❌ Could not deliver the reply to the user (ID: {user_id}).".into(),
            correlation_not_found:
                "⚠️ Error: could not find the user ID in the message you replied to.".into(),
            consultant_greeting:
                "Hello dear consultant! 👋\n\nTo answer a question, reply to its message.".into(),
            owner_greeting:
                "Hello, you are recognised as the administrator.\nUse /stats for the consultant report."
                    .into(),
            stats_header: "📊 <b>Consultant report:</b>".into(),
            stats_empty: "No statistics to show yet.".into(),
            ask_button: "❓ Ask a new question".into(),
            internal_error: "Something went wrong. Please try again later.".into(),
        }
    }
}

impl MessageTemplates {
    /// Replace `{key}` placeholders in `template` with the given values.
    pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
        values
            .iter()
            .fold(template.to_string(), |text, (key, value)| {
                text.replace(&format!("{{{key}}}"), value)
            })
    }
}
