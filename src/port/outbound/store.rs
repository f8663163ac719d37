//! Preference store port.
//!
//! The store is an external record collection; this trait is the only way
//! the application reads or writes subscriber preferences.

use async_trait::async_trait;

use crate::domain::{SubscriberPreference, SubscriberRecord};
use crate::error::StoreError;

/// Create and query subscriber preferences.
///
/// Matching is exact string equality on both fields. Callers normalize input
/// before querying if they need to; implementations must not.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Persist a new preference. Fails with [`StoreError::Write`].
    async fn create(&self, preference: &SubscriberPreference) -> Result<(), StoreError>;

    /// All rows whose instrument and timeframe equal the arguments, columns
    /// passed through as stored. Fails with [`StoreError::Read`] only when the
    /// store cannot be reached or does not answer with a list.
    async fn query(
        &self,
        instrument: &str,
        timeframe: &str,
    ) -> Result<Vec<SubscriberRecord>, StoreError>;

    /// Backend name for logging.
    fn store_name(&self) -> &'static str;
}
