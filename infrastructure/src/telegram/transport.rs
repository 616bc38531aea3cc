use async_trait::async_trait;
use consult_application::{MessageAction, OutboundMessage, Recipient, Transport, TransportError};
use std::time::Duration;
use teloxide::{
    ApiError, RequestError,
    payloads::SendMessageSetters,
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
};
use tracing::debug;

/// HTTP client timeout; must exceed the long-polling timeout used by the
/// update loop so `getUpdates` is not cut short.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(45);

/// Build a bot whose HTTP client outlives a long poll.
pub fn build_bot(token: &str) -> Result<Bot, TransportError> {
    let client = teloxide::net::default_reqwest_settings()
        .timeout(CLIENT_TIMEOUT)
        .build()
        .map_err(|e| TransportError::Other(e.to_string()))?;
    Ok(Bot::with_client(token, client))
}

/// Delivers HTML messages through the Bot API.
///
/// Each delivery is a single `sendMessage` call bounded by `timeout`; there
/// are no retries.
pub struct TelegramTransport {
    bot: Bot,
    timeout: Duration,
    ask_button: String,
}

impl TelegramTransport {
    pub fn new(bot: Bot, timeout: Duration, ask_button: impl Into<String>) -> Self {
        Self {
            bot,
            timeout,
            ask_button: ask_button.into(),
        }
    }

    fn keyboard(&self, actions: &[MessageAction]) -> InlineKeyboardMarkup {
        let rows = actions
            .iter()
            .map(|action| {
                let label = match action {
                    MessageAction::AskNewQuestion => self.ask_button.clone(),
                };
                vec![InlineKeyboardButton::callback(label, action.callback_data())]
            })
            .collect::<Vec<_>>();
        InlineKeyboardMarkup::new(rows)
    }
}

fn classify(error: RequestError) -> TransportError {
    match error {
        RequestError::Api(api) => match api {
            ApiError::BotBlocked | ApiError::ChatNotFound | ApiError::UserDeactivated => {
                TransportError::Unreachable(api.to_string())
            }
            other => TransportError::Rejected(other.to_string()),
        },
        RequestError::Network(e) if e.is_timeout() => TransportError::Timeout,
        RequestError::Network(e) => TransportError::Unreachable(e.to_string()),
        other => TransportError::Other(other.to_string()),
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn deliver(
        &self,
        recipient: Recipient,
        message: &OutboundMessage,
    ) -> Result<(), TransportError> {
        let mut request = self
            .bot
            .send_message(ChatId(recipient.chat_id()), message.html.clone())
            .parse_mode(ParseMode::Html);
        if !message.actions.is_empty() {
            request = request.reply_markup(self.keyboard(&message.actions));
        }

        match tokio::time::timeout(self.timeout, request.send()).await {
            Ok(Ok(_)) => {
                debug!(%recipient, "message delivered");
                Ok(())
            }
            Ok(Err(e)) => Err(classify(e)),
            Err(_) => Err(TransportError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_user_is_unreachable() {
        assert!(matches!(
            classify(RequestError::Api(ApiError::BotBlocked)),
            TransportError::Unreachable(_)
        ));
    }

    #[test]
    fn test_other_api_errors_are_rejections() {
        assert!(matches!(
            classify(RequestError::Api(ApiError::MessageTextIsEmpty)),
            TransportError::Rejected(_)
        ));
    }

    #[test]
    fn test_keyboard_has_one_row_per_action() {
        let bot = Bot::new("0:test");
        let transport = TelegramTransport::new(bot, Duration::from_secs(1), "Ask");
        let keyboard = transport.keyboard(&[MessageAction::AskNewQuestion]);
        assert_eq!(keyboard.inline_keyboard.len(), 1);
        assert_eq!(keyboard.inline_keyboard[0][0].text, "Ask");
    }
}
