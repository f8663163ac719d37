//! Match forwarding webhook settings.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Automation endpoint receiving every match result. Overridden by `N8N_WEBHOOK_URL`.
    pub url: String,
}
