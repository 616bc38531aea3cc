//! Inbound update mapping

use consult_application::MessageAction;
use consult_domain::{RepliedMessage, SenderMeta};
use teloxide::types::{CallbackQuery, Message, User, UserId as TgUserId};
use tracing::debug;

/// Bot commands understood by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    /// `/ask`, or its alias `/soal`
    Ask,
    Stats,
}

impl Command {
    /// Parse `/name`, `/name@bot` or `/name args`.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?.strip_prefix('/')?;
        let name = word.split('@').next().unwrap_or(word);
        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "ask" | "soal" => Some(Self::Ask),
            "stats" => Some(Self::Stats),
            _ => None,
        }
    }
}

/// How the text of a private message is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextKind {
    Command(Command),
    /// A `/word` the router does not know. Never treated as a question.
    UnknownCommand,
    Plain,
}

impl TextKind {
    fn of(text: &str) -> Self {
        match Command::parse(text) {
            Some(command) => Self::Command(command),
            None if text.trim_start().starts_with('/') => Self::UnknownCommand,
            None => Self::Plain,
        }
    }
}

/// The person behind an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: i64,
    pub meta: SenderMeta,
}

impl Sender {
    fn from_user(user: &User) -> Option<Self> {
        let id = i64::try_from(user.id.0).ok()?;
        Some(Self {
            id,
            meta: SenderMeta::new(Some(user.full_name()), user.username.clone()),
        })
    }
}

/// An update the router acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command {
        sender: Sender,
        command: Command,
    },
    /// The inline "ask new question" button.
    AskButton { sender: Sender },
    Text {
        sender: Sender,
        text: String,
        replied_to: Option<RepliedMessage>,
    },
}

impl InboundEvent {
    /// Map a private-chat text message. `bot_id` decides whether a replied-to
    /// message was sent by this bot.
    pub fn from_message(msg: &Message, bot_id: TgUserId) -> Option<Self> {
        if !msg.chat.is_private() {
            return None;
        }
        let sender = Sender::from_user(msg.from.as_ref()?)?;
        let text = msg.text()?;

        match TextKind::of(text) {
            TextKind::Command(command) => return Some(Self::Command { sender, command }),
            TextKind::UnknownCommand => {
                debug!(sender = sender.id, text, "ignoring unknown command");
                return None;
            }
            TextKind::Plain => {}
        }

        let replied_to = msg.reply_to_message().map(|original| RepliedMessage {
            sent_by_system: original.from.as_ref().is_some_and(|u| u.id == bot_id),
            text: original.text().unwrap_or_default().to_string(),
        });
        Some(Self::Text {
            sender,
            text: text.to_string(),
            replied_to,
        })
    }

    pub fn from_callback(query: &CallbackQuery) -> Option<Self> {
        let data = query.data.as_deref()?;
        if data != MessageAction::AskNewQuestion.callback_data() {
            return None;
        }
        Some(Self::AskButton {
            sender: Sender::from_user(&query.from)?,
        })
    }
}
