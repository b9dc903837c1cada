//! API module
//!
//! All interaction with external systems (the Telegram Bot API)

pub mod telegram;

pub use telegram::TelegramClient;
