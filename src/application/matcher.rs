//! Signal matching against stored preferences.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{MatchResult, Signal};
use crate::error::StoreError;
use crate::port::PreferenceStore;

/// Looks up the subscribers interested in a signal.
#[derive(Clone)]
pub struct SignalMatcher {
    store: Arc<dyn PreferenceStore>,
}

impl SignalMatcher {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Query the store for exact matches and package them with the signal.
    ///
    /// Store failures are returned unchanged.
    pub async fn match_signal(&self, signal: &Signal) -> Result<MatchResult, StoreError> {
        debug!(
            store = self.store.store_name(),
            instrument = %signal.instrument,
            timeframe = %signal.timeframe,
            "Querying matching subscribers"
        );

        let subscribers = self
            .store
            .query(&signal.instrument, &signal.timeframe)
            .await?;

        let result = MatchResult::new(signal.clone(), subscribers);
        info!(
            instrument = %signal.instrument,
            timeframe = %signal.timeframe,
            subscriber_count = result.subscriber_count,
            "Matched subscribers"
        );
        Ok(result)
    }
}
