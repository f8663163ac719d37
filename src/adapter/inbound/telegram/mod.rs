//! Telegram transport for the preference dialogue.
//!
//! Requires the `telegram` feature to be enabled.

mod bot;
mod command;
mod keyboard;

pub use bot::{conversation_key, run_bot};
pub use command::{event_for_text, parse_command, CommandParseError, DialogueCommand};
pub use keyboard::keyboard_for;
