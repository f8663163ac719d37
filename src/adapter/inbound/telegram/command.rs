//! Telegram command parsing.

use crate::application::dialogue::DialogueEvent;

/// Supported Telegram commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueCommand {
    Start,
    Cancel,
    Help,
}

/// Parse error for Telegram command messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command `{cmd}`"),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a Telegram message into a bot command.
pub fn parse_command(text: &str) -> Result<DialogueCommand, CommandParseError> {
    let Some(raw_command) = text.split_whitespace().next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(DialogueCommand::Start),
        "/cancel" => Ok(DialogueCommand::Cancel),
        "/help" => Ok(DialogueCommand::Help),
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

/// Translate message text into a dialogue event.
///
/// Unknown commands map to help; plain text is passed through.
pub fn event_for_text(text: &str) -> DialogueEvent {
    match parse_command(text) {
        Ok(DialogueCommand::Start) => DialogueEvent::Start,
        Ok(DialogueCommand::Cancel) => DialogueEvent::Cancel,
        Ok(DialogueCommand::Help) | Err(CommandParseError::UnknownCommand(_)) => {
            DialogueEvent::Help
        }
        Err(CommandParseError::NotACommand) => DialogueEvent::Text(text.trim().to_string()),
    }
}

/// Commands registered with Telegram for the "/" menu.
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("start", "Choose the signals you want to receive"),
        ("cancel", "Abandon the current selection"),
        ("help", "Show available commands"),
    ]
}
