//! Telegram Bot API adapters

mod transport;

pub use transport::{TelegramTransport, build_bot};
