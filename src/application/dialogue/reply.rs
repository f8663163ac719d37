//! Outbound messages produced by the dialogue.
//!
//! Every handled event yields exactly one [`Reply`]. The transport decides how
//! to render choices (inline keyboard, plain list, ...).

use crate::domain::{Market, SubscriberPreference};

use super::event::CallbackToken;
use super::state::DialogueState;

/// One selectable option in a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub token: CallbackToken,
}

impl Choice {
    pub fn new(label: impl Into<String>, token: CallbackToken) -> Self {
        Self {
            label: label.into(),
            token,
        }
    }
}

/// A request for the user to pick from a choice set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub state: DialogueState,
    pub market: Option<Market>,
    pub instrument: Option<String>,
    pub choices: Vec<Choice>,
    pub back: Option<Choice>,
    /// Set when the prompt is repeated because the last input was invalid.
    pub rejected: bool,
}

impl Prompt {
    #[must_use]
    pub fn text(&self) -> String {
        let question = match (self.state, self.market, self.instrument.as_deref()) {
            (DialogueState::AwaitingMarket, _, _) => "Which market do you want signals for?".to_string(),
            (DialogueState::AwaitingInstrument, Some(market), _) => {
                format!("Pick a {} instrument:", market.label())
            }
            (DialogueState::AwaitingInstrument, None, _) => "Pick an instrument:".to_string(),
            (DialogueState::AwaitingTimeframe, _, Some(instrument)) => {
                format!("Pick a timeframe for {instrument}:")
            }
            (DialogueState::AwaitingTimeframe, _, None) => "Pick a timeframe:".to_string(),
        };

        if self.rejected {
            format!("That is not one of the options.\n{question}")
        } else {
            question
        }
    }
}

/// The single outbound message for a handled event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Present a choice set.
    Prompt(Prompt),
    /// The preference was stored.
    Subscribed(SubscriberPreference),
    /// Storing the preference failed; the session has ended. The cause is
    /// logged, never shown.
    SaveFailed,
    Cancelled,
    NothingToCancel,
    /// Input arrived without an active session.
    NoSession,
    Help,
}

impl Reply {
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Prompt(prompt) => prompt.text(),
            Self::Subscribed(pref) => format!(
                "Subscribed to {} {} signals ({}).",
                pref.instrument,
                pref.timeframe,
                pref.market.label()
            ),
            Self::SaveFailed => {
                "Sorry, your preference could not be saved right now.\nSend /start to try again."
                    .to_string()
            }
            Self::Cancelled => "Cancelled. Send /start to begin again.".to_string(),
            Self::NothingToCancel => "Nothing to cancel.".to_string(),
            Self::NoSession => "Send /start to choose the signals you want.".to_string(),
            Self::Help => help_text().to_string(),
        }
    }

    /// The prompt carried by this reply, if any.
    #[must_use]
    pub fn prompt(&self) -> Option<&Prompt> {
        match self {
            Self::Prompt(prompt) => Some(prompt),
            _ => None,
        }
    }
}

/// Command help shown for `/help`.
#[must_use]
pub fn help_text() -> &'static str {
    "Commands:\n\
     /start - choose a market, instrument and timeframe to follow\n\
     /cancel - abandon the current selection\n\
     /help - show this message"
}
