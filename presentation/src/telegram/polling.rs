//! Long-polling update loop

use crate::telegram::handler::UpdateHandler;
use crate::telegram::inbound::InboundEvent;
use std::time::Duration;
use teloxide::{
    ApiError, RequestError,
    prelude::*,
    types::{AllowedUpdate, BotCommand, UpdateKind},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Commands registered for autocomplete in Telegram clients.
pub const BOT_COMMANDS: [(&str, &str); 2] = [
    ("start", "🚀 Start or register"),
    ("ask", "❓ Ask a new question"),
];

const POLL_TIMEOUT_SECONDS: u32 = 30;
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Poll updates until `cancel` fires.
///
/// Updates are handled one at a time in arrival order.
pub async fn run_polling(
    bot: Bot,
    handler: UpdateHandler,
    cancel: CancellationToken,
) -> Result<(), RequestError> {
    let me = bot.get_me().await?;
    let bot_id = me.user.id;
    bot.delete_webhook().await?;

    let commands = BOT_COMMANDS
        .iter()
        .map(|(name, description)| BotCommand::new(*name, *description))
        .collect::<Vec<_>>();
    if let Err(e) = bot.set_my_commands(commands).await {
        warn!("failed to register bot commands: {e}");
    }

    info!(username = ?me.user.username, "telegram bot connected, polling updates");

    let mut offset: i32 = 0;
    loop {
        let request = bot
            .get_updates()
            .offset(offset)
            .timeout(POLL_TIMEOUT_SECONDS)
            .allowed_updates(vec![AllowedUpdate::Message, AllowedUpdate::CallbackQuery]);

        let result = tokio::select! {
            _ = cancel.cancelled() => {
                info!("telegram polling stopped");
                return Ok(());
            }
            result = request.send() => result,
        };

        match result {
            Ok(updates) => {
                debug!(count = updates.len(), "got telegram updates");
                for update in updates {
                    offset = update.id.as_offset();
                    let event = match update.kind {
                        UpdateKind::Message(msg) => InboundEvent::from_message(&msg, bot_id),
                        UpdateKind::CallbackQuery(query) => {
                            if let Err(e) = bot.answer_callback_query(&query.id).await {
                                debug!("failed to answer callback query: {e}");
                            }
                            InboundEvent::from_callback(&query)
                        }
                        other => {
                            debug!("ignoring update: {other:?}");
                            None
                        }
                    };
                    if let Some(event) = event {
                        handler.handle(event).await;
                    }
                }
            }
            Err(RequestError::Api(ApiError::TerminatedByOtherGetUpdates)) => {
                error!("another instance is polling with this token, stopping");
                return Err(RequestError::Api(ApiError::TerminatedByOtherGetUpdates));
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch updates, retrying");
                tokio::select! {
                    _ = cancel.cancelled() => return Ok(()),
                    _ = tokio::time::sleep(RETRY_DELAY) => {}
                }
            }
        }
    }
}
