//! Inbound adapters (driving side): CLI, HTTP, and the Telegram bot.

pub mod cli;
pub mod http;

#[cfg(feature = "telegram")]
pub mod telegram;
