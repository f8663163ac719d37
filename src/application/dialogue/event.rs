//! Typed inputs delivered by the chat transport.

use crate::domain::{Market, Timeframe};

/// One inbound event for a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueEvent {
    /// Begin (or restart) the preference flow.
    Start,
    /// Abandon the flow and discard collected fields.
    Cancel,
    /// Ask for command help.
    Help,
    /// Free-text reply.
    Text(String),
    /// Inline button press carrying a callback token.
    Button(String),
}

/// Parsed inline-button callback token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackToken {
    Market(Market),
    /// Instrument as written in the token; catalog membership is checked
    /// against the session's market.
    Instrument(String),
    Timeframe(Timeframe),
    BackToMarket,
    BackToInstrument,
}

impl CallbackToken {
    pub const BACK_TO_MARKET: &'static str = "back_to_market";
    pub const BACK_TO_INSTRUMENT: &'static str = "back_to_instrument";

    /// Parse a callback token; `None` for anything unrecognized.
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            Self::BACK_TO_MARKET => return Some(Self::BackToMarket),
            Self::BACK_TO_INSTRUMENT => return Some(Self::BackToInstrument),
            _ => {}
        }

        let (kind, value) = data.split_once('_')?;
        match kind {
            "market" => value.parse().ok().map(Self::Market),
            "instrument" if !value.is_empty() => Some(Self::Instrument(value.to_string())),
            "timeframe" => value.parse().ok().map(Self::Timeframe),
            _ => None,
        }
    }

    /// Encode back into the wire token.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Market(m) => format!("market_{}", m.as_str()),
            Self::Instrument(i) => format!("instrument_{i}"),
            Self::Timeframe(tf) => format!("timeframe_{}", tf.as_str()),
            Self::BackToMarket => Self::BACK_TO_MARKET.to_string(),
            Self::BackToInstrument => Self::BACK_TO_INSTRUMENT.to_string(),
        }
    }
}
