//! Inbound signals and the match results built from them.

use serde::{Deserialize, Serialize};

use super::record::SubscriberRecord;

/// An (instrument, timeframe) pair to match against stored preferences.
///
/// Both fields are kept verbatim; matching is exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signal {
    pub instrument: String,
    pub timeframe: String,
}

impl Signal {
    pub fn new(instrument: impl Into<String>, timeframe: impl Into<String>) -> Self {
        Self {
            instrument: instrument.into(),
            timeframe: timeframe.into(),
        }
    }
}

/// A signal together with every stored row that matched it.
///
/// Serializes to the payload shared by the HTTP response and the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_info: Signal,
    pub subscribers: Vec<SubscriberRecord>,
    pub subscriber_count: usize,
}

impl MatchResult {
    /// Build a result; the count always mirrors the subscriber list.
    #[must_use]
    pub fn new(signal: Signal, subscribers: Vec<SubscriberRecord>) -> Self {
        Self {
            match_info: signal,
            subscriber_count: subscribers.len(),
            subscribers,
        }
    }

    /// Chat ids of all matched subscribers, in result order. Rows without
    /// a usable chat id are skipped.
    #[must_use]
    pub fn chat_ids(&self) -> Vec<String> {
        self.subscribers
            .iter()
            .filter_map(SubscriberRecord::chat_id)
            .collect()
    }
}
