//! The three-step selection state machine.
//!
//! ```text
//! AwaitingMarket ──▶ AwaitingInstrument ──▶ AwaitingTimeframe ──▶ (complete)
//!        ▲   back_to_market  │     ▲ back_to_instrument │
//!        └───────────────────┘     └────────────────────┘
//! ```
//!
//! Sessions are pure data; persistence happens in
//! [`DialogueService`](super::DialogueService) once a session completes.

use crate::domain::{Market, Timeframe};

use super::event::CallbackToken;
use super::reply::{Choice, Prompt};

/// The step a session is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogueState {
    AwaitingMarket,
    AwaitingInstrument,
    AwaitingTimeframe,
}

/// Input that can advance a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Button(String),
}

/// Every field needed to build a preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub market: Market,
    pub instrument: &'static str,
    pub timeframe: Timeframe,
}

/// Result of feeding one input to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The session moved to another step; present its prompt.
    Moved(Prompt),
    /// The input was invalid for the current step; state is unchanged.
    Rejected(Prompt),
    /// All three fields are collected.
    Complete(Completion),
}

/// A selection the current step understands.
enum Selection {
    Market(Market),
    Instrument(&'static str),
    Timeframe(Timeframe),
    BackToMarket,
    BackToInstrument,
}

/// Partially-filled preference for one conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: DialogueState,
    market: Option<Market>,
    instrument: Option<&'static str>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DialogueState::AwaitingMarket,
            market: None,
            instrument: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> DialogueState {
        self.state
    }

    #[must_use]
    pub const fn market(&self) -> Option<Market> {
        self.market
    }

    #[must_use]
    pub const fn instrument(&self) -> Option<&'static str> {
        self.instrument
    }

    /// The prompt for the current step.
    #[must_use]
    pub fn prompt(&self) -> Prompt {
        self.build_prompt(false)
    }

    /// Feed one input to the session.
    pub fn advance(&mut self, input: &Input) -> Advance {
        let Some(selection) = self.interpret(input) else {
            return Advance::Rejected(self.build_prompt(true));
        };

        match (self.state, selection) {
            (DialogueState::AwaitingMarket, Selection::Market(market)) => {
                self.market = Some(market);
                self.instrument = None;
                self.state = DialogueState::AwaitingInstrument;
            }
            (DialogueState::AwaitingInstrument, Selection::Instrument(instrument)) => {
                self.instrument = Some(instrument);
                self.state = DialogueState::AwaitingTimeframe;
            }
            (DialogueState::AwaitingInstrument, Selection::BackToMarket) => {
                self.market = None;
                self.state = DialogueState::AwaitingMarket;
            }
            (DialogueState::AwaitingTimeframe, Selection::BackToInstrument) => {
                self.instrument = None;
                self.state = DialogueState::AwaitingInstrument;
            }
            (DialogueState::AwaitingTimeframe, Selection::Timeframe(timeframe)) => {
                return match (self.market, self.instrument) {
                    (Some(market), Some(instrument)) => Advance::Complete(Completion {
                        market,
                        instrument,
                        timeframe,
                    }),
                    // Unreachable through `advance`; restart rather than persist a partial record.
                    _ => {
                        *self = Self::new();
                        Advance::Moved(self.prompt())
                    }
                };
            }
            _ => return Advance::Rejected(self.build_prompt(true)),
        }

        Advance::Moved(self.prompt())
    }

    /// Map raw input onto a selection valid for the current step.
    fn interpret(&self, input: &Input) -> Option<Selection> {
        match input {
            Input::Button(data) => match CallbackToken::parse(data)? {
                CallbackToken::Market(market) => Some(Selection::Market(market)),
                CallbackToken::Instrument(raw) => self
                    .market?
                    .find_instrument(&raw)
                    .map(Selection::Instrument),
                CallbackToken::Timeframe(tf) => Some(Selection::Timeframe(tf)),
                CallbackToken::BackToMarket => Some(Selection::BackToMarket),
                CallbackToken::BackToInstrument => Some(Selection::BackToInstrument),
            },
            Input::Text(text) => match self.state {
                DialogueState::AwaitingMarket => text.parse().ok().map(Selection::Market),
                DialogueState::AwaitingInstrument => self
                    .market?
                    .find_instrument(text)
                    .map(Selection::Instrument),
                DialogueState::AwaitingTimeframe => text.parse().ok().map(Selection::Timeframe),
            },
        }
    }

    fn build_prompt(&self, rejected: bool) -> Prompt {
        let (choices, back) = match self.state {
            DialogueState::AwaitingMarket => (
                Market::ALL
                    .into_iter()
                    .map(|m| Choice::new(m.label(), CallbackToken::Market(m)))
                    .collect(),
                None,
            ),
            DialogueState::AwaitingInstrument => (
                self.market
                    .map(|m| {
                        m.instruments()
                            .iter()
                            .map(|i| Choice::new(*i, CallbackToken::Instrument((*i).to_string())))
                            .collect()
                    })
                    .unwrap_or_default(),
                Some(Choice::new("Back", CallbackToken::BackToMarket)),
            ),
            DialogueState::AwaitingTimeframe => (
                Timeframe::ALL
                    .into_iter()
                    .map(|tf| Choice::new(tf.as_str(), CallbackToken::Timeframe(tf)))
                    .collect(),
                Some(Choice::new("Back", CallbackToken::BackToInstrument)),
            ),
        };

        Prompt {
            state: self.state,
            market: self.market,
            instrument: self.instrument.map(str::to_string),
            choices,
            back,
            rejected,
        }
    }
}
