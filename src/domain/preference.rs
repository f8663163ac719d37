//! Subscriber preference records.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::market::Market;
use super::timeframe::Timeframe;

/// Unique subscriber token, generated when a dialogue completes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberId(String);

impl SubscriberId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A subscriber's interest in one instrument on one timeframe.
///
/// Created once when a dialogue completes and never modified. This is the
/// shape written to the store; rows read back are
/// [`SubscriberRecord`](super::SubscriberRecord)s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberPreference {
    pub subscriber_id: SubscriberId,
    /// Opaque chat identity the preference was collected from.
    pub chat_id: String,
    pub market: Market,
    pub instrument: String,
    pub timeframe: Timeframe,
}

impl SubscriberPreference {
    /// Assemble a new preference with a freshly generated subscriber id.
    pub fn new(
        chat_id: impl Into<String>,
        market: Market,
        instrument: impl Into<String>,
        timeframe: Timeframe,
    ) -> Self {
        Self {
            subscriber_id: SubscriberId::generate(),
            chat_id: chat_id.into(),
            market,
            instrument: instrument.into(),
            timeframe,
        }
    }

    /// Whether this preference matches a signal's instrument and timeframe exactly.
    #[must_use]
    pub fn matches(&self, instrument: &str, timeframe: &str) -> bool {
        self.instrument == instrument && self.timeframe.as_str() == timeframe
    }
}
