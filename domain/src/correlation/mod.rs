//! Reply correlation.
//!
//! Every question forwarded to a consultant carries the asker's id on a
//! labelled line (`User ID: 123456`). When the consultant replies to that
//! message, the id is read back from the replied-to text so the answer can
//! be relayed to the right user.

use crate::core::ids::{ConsultantId, UserId};
use crate::util::escape_html;
use serde::{Deserialize, Serialize};

/// Label preceding the asker's id in every forwarded question.
pub const USER_ID_LABEL: &str = "User ID:";

/// Longest digit run accepted after the label (`i64::MAX` has 19 digits).
const MAX_ID_DIGITS: usize = 19;

/// Sender metadata attached to an inbound chat message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderMeta {
    pub display_name: Option<String>,
    pub handle: Option<String>,
}

impl SenderMeta {
    pub fn new(display_name: Option<String>, handle: Option<String>) -> Self {
        Self {
            display_name,
            handle,
        }
    }
}

/// The message a consultant replied to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepliedMessage {
    /// Whether the replied-to message was sent by this service.
    pub sent_by_system: bool,
    /// Plain text of the replied-to message.
    pub text: String,
}

/// Everything needed to route a consultant's reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyContext {
    pub consultant: ConsultantId,
    pub sender: SenderMeta,
    pub text: String,
    pub replied_to: Option<RepliedMessage>,
}

/// Find the asker of a consultant reply.
///
/// Only a direct reply to a message this service sent counts; free text
/// that merely mentions an id does not.
pub fn extract_user_id(context: &ReplyContext) -> Option<UserId> {
    let replied = context.replied_to.as_ref()?;
    if !replied.sent_by_system {
        return None;
    }
    parse_user_id_field(&replied.text)
}

/// Read the id following the first [`USER_ID_LABEL`] in `body`.
///
/// Only the first label is considered: the user's question text is placed
/// after it and may contain the label itself.
pub fn parse_user_id_field(body: &str) -> Option<UserId> {
    let (_, rest) = body.split_once(USER_ID_LABEL)?;
    let rest = rest.trim_start_matches([' ', '\t']);
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits > MAX_ID_DIGITS {
        return None;
    }
    rest[..digits].parse::<i64>().ok().map(UserId::new)
}

/// A question as forwarded to a consultant (Value Object)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundQuestion {
    pub user_id: UserId,
    pub full_name: String,
    pub phone: String,
    pub city: String,
    pub handle: Option<String>,
    pub text: String,
}

impl OutboundQuestion {
    /// HTML body with escaped profile fields and the correlation line.
    ///
    /// The id line comes before every user-supplied field so that it is
    /// always the first label in the body.
    pub fn to_html(&self) -> String {
        let handle = self
            .handle
            .as_deref()
            .filter(|h| !h.is_empty())
            .map_or_else(|| "none".to_string(), |h| format!("@{}", escape_html(h)));
        format!(
            "📩 <b>New consultation request</b>\n\n\
             <b>{USER_ID_LABEL}</b> <code>{}</code>\n\
             <b>Name:</b> {}\n\
             <b>Phone:</b> {}\n\
             <b>City:</b> {}\n\
             <b>Username:</b> {}\n\n\
             <b>Question:</b>\n{}",
            self.user_id,
            escape_html(&self.full_name),
            escape_html(&self.phone),
            escape_html(&self.city),
            handle,
            escape_html(&self.text),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_to(text: &str, sent_by_system: bool) -> ReplyContext {
        ReplyContext {
            consultant: ConsultantId::new(900),
            sender: SenderMeta::default(),
            text: "Please rest well.".into(),
            replied_to: Some(RepliedMessage {
                sent_by_system,
                text: text.into(),
            }),
        }
    }

    /// What a chat client shows for the HTML body: tags stripped.
    fn strip_tags(html: &str) -> String {
        let mut out = String::new();
        let mut in_tag = false;
        for c in html.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => out.push(c),
                _ => {}
            }
        }
        out
    }

    #[test]
    fn test_extracts_from_system_message() {
        let ctx = reply_to("Name: A B\nUser ID: 123456\nQuestion:\nhi", true);
        assert_eq!(extract_user_id(&ctx), Some(UserId::new(123456)));
    }

    #[test]
    fn test_requires_reply_relationship() {
        let mut ctx = reply_to("User ID: 1", true);
        ctx.replied_to = None;
        assert_eq!(extract_user_id(&ctx), None);
    }

    #[test]
    fn test_rejects_reply_to_foreign_message() {
        let ctx = reply_to("User ID: 123456", false);
        assert_eq!(extract_user_id(&ctx), None);
    }

    #[test]
    fn test_missing_or_malformed_label() {
        assert_eq!(parse_user_id_field("no id here 123"), None);
        assert_eq!(parse_user_id_field("User ID: abc"), None);
        assert_eq!(parse_user_id_field("User ID:"), None);
        assert_eq!(parse_user_id_field("user id: 42"), None);
    }

    #[test]
    fn test_digit_run_is_bounded() {
        assert_eq!(parse_user_id_field(&format!("User ID: {}", "9".repeat(20))), None);
        assert_eq!(parse_user_id_field("User ID: 99999999999999999999x"), None);
        assert_eq!(
            parse_user_id_field("User ID: 42\nUsername: @x"),
            Some(UserId::new(42))
        );
    }

    #[test]
    fn test_first_label_wins_over_question_text() {
        let body = "User ID: 7\nQuestion:\nUser ID: 8";
        assert_eq!(parse_user_id_field(body), Some(UserId::new(7)));
    }

    #[test]
    fn test_profile_fields_cannot_redirect_replies() {
        let question = OutboundQuestion {
            user_id: UserId::new(7),
            full_name: "Ali Rezaei".into(),
            phone: "09123456789".into(),
            city: "User ID: 42".into(),
            handle: Some("ali".into()),
            text: "User ID: 43".into(),
        };
        let ctx = reply_to(&strip_tags(&question.to_html()), true);
        assert_eq!(extract_user_id(&ctx), Some(UserId::new(7)));
    }

    #[test]
    fn test_rendered_question_correlates_back() {
        let question = OutboundQuestion {
            user_id: UserId::new(5550123),
            full_name: "Sara <Admin>".into(),
            phone: "09123456789".into(),
            city: "Shiraz".into(),
            handle: None,
            text: "User ID: 1, can you help?".into(),
        };
        let html = question.to_html();
        assert!(html.contains("Sara &lt;Admin&gt;"));
        assert!(html.contains("<b>Username:</b> none"));
        assert_eq!(
            parse_user_id_field(&strip_tags(&html)),
            Some(UserId::new(5550123))
        );
    }
}
