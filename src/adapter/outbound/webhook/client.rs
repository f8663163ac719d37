//! HTTP webhook forwarder.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::debug;

use crate::domain::MatchResult;
use crate::error::ForwardError;
use crate::port::MatchForwarder;

/// Posts match results as JSON to a fixed URL.
pub struct WebhookForwarder {
    http: HttpClient,
    url: String,
}

impl WebhookForwarder {
    pub fn new(http: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl MatchForwarder for WebhookForwarder {
    async fn forward(&self, result: &MatchResult) -> Result<(), ForwardError> {
        let response = self.http.post(&self.url).json(result).send().await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %body, "Webhook responded");

        if !status.is_success() {
            return Err(ForwardError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
