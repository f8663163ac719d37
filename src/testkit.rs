//! In-memory port implementations for tests.
//!
//! Enabled for unit tests and, through the `testkit` feature, for the
//! integration tests under `tests/`.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tokio::sync::Notify;
use tokio::time::Instant;

use crate::domain::{MatchResult, SubscriberPreference, SubscriberRecord};
use crate::error::{ForwardError, StoreError};
use crate::port::{MatchForwarder, PreferenceStore};

/// In-memory preference store with switchable failures.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    records: RwLock<Vec<SubscriberPreference>>,
    /// Rows seeded as raw JSON, e.g. legacy shapes the dialogue never writes.
    raw_rows: RwLock<Vec<SubscriberRecord>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    queries: AtomicUsize,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records.
    pub fn with_records(records: Vec<SubscriberPreference>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Self::default()
        }
    }

    /// Seed raw rows returned by queries alongside the typed records.
    pub fn with_raw_rows(self, rows: Vec<SubscriberRecord>) -> Self {
        *self.raw_rows.write() = rows;
        self
    }

    /// Make subsequent queries fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent creates fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of everything stored so far.
    pub fn records(&self) -> Vec<SubscriberPreference> {
        self.records.read().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn create(&self, preference: &SubscriberPreference) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::write(Some(500), "memory store write disabled"));
        }
        self.records.write().push(preference.clone());
        Ok(())
    }

    async fn query(
        &self,
        instrument: &str,
        timeframe: &str,
    ) -> Result<Vec<SubscriberRecord>, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::read(Some(500), "memory store read disabled"));
        }
        let mut rows: Vec<SubscriberRecord> = self
            .records
            .read()
            .iter()
            .filter(|r| r.matches(instrument, timeframe))
            .map(SubscriberRecord::from)
            .collect();
        rows.extend(
            self.raw_rows
                .read()
                .iter()
                .filter(|r| r.matches(instrument, timeframe))
                .cloned(),
        );
        Ok(rows)
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}

/// Forwarder that records every delivery attempt.
#[derive(Debug, Default)]
pub struct RecordingForwarder {
    delivered: Mutex<Vec<MatchResult>>,
    notify: Notify,
    failing: bool,
}

impl RecordingForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A forwarder that records the attempt and then reports a rejection.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.delivered.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait until at least `count` attempts were recorded, or two seconds pass.
    pub async fn wait_for(&self, count: usize) -> Vec<MatchResult> {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            {
                let delivered = self.delivered.lock();
                if delivered.len() >= count {
                    return delivered.clone();
                }
            }
            if tokio::time::timeout_at(deadline, self.notify.notified())
                .await
                .is_err()
            {
                return self.delivered.lock().clone();
            }
        }
    }
}

#[async_trait]
impl MatchForwarder for RecordingForwarder {
    async fn forward(&self, result: &MatchResult) -> Result<(), ForwardError> {
        self.delivered.lock().push(result.clone());
        self.notify.notify_one();
        if self.failing {
            return Err(ForwardError::Rejected {
                status: 503,
                body: "recording forwarder set to fail".into(),
            });
        }
        Ok(())
    }
}
