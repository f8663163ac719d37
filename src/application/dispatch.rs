//! Asynchronous, best-effort delivery of match results.
//!
//! The request path enqueues a result and returns; a background worker owns
//! delivery and its failures. On shutdown the worker delivers whatever is
//! still queued before it exits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::domain::MatchResult;
use crate::port::MatchForwarder;

/// Queue handle for forwarding match results.
#[derive(Clone)]
pub struct ForwardDispatcher {
    sender: mpsc::UnboundedSender<MatchResult>,
    /// Results enqueued but not yet handed to the forwarder.
    pending: Arc<AtomicUsize>,
    stop: Arc<Notify>,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl ForwardDispatcher {
    /// Create a dispatcher and spawn its background worker.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn(forwarder: Arc<dyn MatchForwarder>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let pending = Arc::new(AtomicUsize::new(0));
        let stop = Arc::new(Notify::new());
        let worker = tokio::spawn(forward_worker(
            forwarder,
            receiver,
            Arc::clone(&pending),
            Arc::clone(&stop),
        ));
        Self {
            sender,
            pending,
            stop,
            worker: Arc::new(Mutex::new(Some(worker))),
        }
    }

    /// Enqueue a result for delivery. Never blocks, never fails.
    pub fn dispatch(&self, result: MatchResult) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.sender.send(result).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            warn!("Forward dispatcher closed, dropping match result");
        }
    }

    /// Results accepted but not yet delivered (or failed).
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Stop accepting results and wait up to `grace` for the queue to drain.
    ///
    /// Returns the number of results left undelivered. Later calls return
    /// immediately.
    pub async fn shutdown(&self, grace: Duration) -> usize {
        let worker = self.worker.lock().take();
        let Some(worker) = worker else {
            return self.pending();
        };
        self.stop.notify_one();

        if tokio::time::timeout(grace, worker).await.is_err() {
            let left = self.pending();
            warn!(undelivered = left, "Forward worker did not drain in time");
            return left;
        }
        info!("Forward worker drained");
        self.pending()
    }
}

async fn forward_worker(
    forwarder: Arc<dyn MatchForwarder>,
    mut receiver: mpsc::UnboundedReceiver<MatchResult>,
    pending: Arc<AtomicUsize>,
    stop: Arc<Notify>,
) {
    info!("Forward worker started");

    loop {
        tokio::select! {
            next = receiver.recv() => match next {
                Some(result) => deliver(forwarder.as_ref(), &result, &pending).await,
                None => break,
            },
            () = stop.notified() => {
                receiver.close();
                while let Some(result) = receiver.recv().await {
                    deliver(forwarder.as_ref(), &result, &pending).await;
                }
                break;
            }
        }
    }

    info!("Forward worker shutting down");
}

async fn deliver(forwarder: &dyn MatchForwarder, result: &MatchResult, pending: &AtomicUsize) {
    match forwarder.forward(result).await {
        Ok(()) => info!(
            instrument = %result.match_info.instrument,
            timeframe = %result.match_info.timeframe,
            subscriber_count = result.subscriber_count,
            "Forwarded match result"
        ),
        Err(e) => error!(
            error = %e,
            instrument = %result.match_info.instrument,
            timeframe = %result.match_info.timeframe,
            "Failed to forward match result"
        ),
    }
    pending.fetch_sub(1, Ordering::SeqCst);
}
