//! Match forwarding port.

use async_trait::async_trait;

use crate::domain::MatchResult;
use crate::error::ForwardError;

/// Delivers match results to a downstream automation endpoint.
///
/// Callers treat delivery as best-effort; see
/// [`ForwardDispatcher`](crate::application::dispatch::ForwardDispatcher).
#[async_trait]
pub trait MatchForwarder: Send + Sync {
    async fn forward(&self, result: &MatchResult) -> Result<(), ForwardError>;
}
