//! Composition root: wires adapters to application services and runs them.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::adapter::inbound::http::{create_router, AppState};
use crate::adapter::outbound::supabase::SupabaseStore;
use crate::adapter::outbound::webhook::WebhookForwarder;
use crate::application::{ForwardDispatcher, SignalMatcher};
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::{MatchForwarder, PreferenceStore};

/// Time allowed for the bot to wind down after the server stops.
const BOT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Time allowed for queued match results to reach the webhook on shutdown.
const FORWARD_DRAIN_GRACE: Duration = Duration::from_secs(10);

/// Outbound adapters built from configuration.
pub struct Components {
    pub store: Arc<dyn PreferenceStore>,
    pub forwarder: Arc<dyn MatchForwarder>,
}

/// Build the store and forwarder on a shared HTTP client.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the store
/// credentials cannot be encoded as headers.
pub fn build_components(config: &Config) -> Result<Components> {
    let http = config.http.build_client()?;
    let store = SupabaseStore::from_config(config, http.clone())?;
    info!(store = store.store_name(), endpoint = store.endpoint(), "Preference store ready");

    let forwarder = WebhookForwarder::new(http, config.webhook.url.clone());
    Ok(Components {
        store: Arc::new(store),
        forwarder: Arc::new(forwarder),
    })
}

/// Build the HTTP state around a store and forwarder.
///
/// Must be called inside a Tokio runtime; the forward worker is spawned here.
pub fn build_state(
    store: Arc<dyn PreferenceStore>,
    forwarder: Arc<dyn MatchForwarder>,
) -> Arc<AppState> {
    let dispatcher = ForwardDispatcher::spawn(forwarder);
    Arc::new(AppState::new(SignalMatcher::new(store), dispatcher))
}

/// Run the HTTP server, and the bot when enabled, until Ctrl+C.
///
/// # Errors
///
/// Returns an error if wiring fails or the listener cannot be bound.
pub async fn run(config: Config) -> Result<()> {
    let components = build_components(&config)?;
    let state = build_state(components.store.clone(), components.forwarder);
    let dispatcher = state.dispatcher.clone();
    let router = create_router(state);

    let bot = spawn_bot(&config, components.store);

    let listener = TcpListener::bind(&config.server.bind).await?;
    info!(addr = %config.server.bind, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");

    dispatcher.shutdown(FORWARD_DRAIN_GRACE).await;

    if let Some(handle) = bot {
        if tokio::time::timeout(BOT_SHUTDOWN_GRACE, handle).await.is_err() {
            warn!("Telegram bot did not stop in time");
        }
    }
    Ok(())
}

#[cfg(feature = "telegram")]
fn spawn_bot(config: &Config, store: Arc<dyn PreferenceStore>) -> Option<JoinHandle<()>> {
    use crate::adapter::inbound::telegram::run_bot;
    use crate::application::DialogueService;

    if !config.telegram.enabled {
        info!("Telegram bot disabled");
        return None;
    }

    info!(token = %config.telegram.masked_token(), "Starting Telegram bot");
    let dialogue = Arc::new(DialogueService::new(store));
    Some(tokio::spawn(run_bot(
        config.telegram.bot_token.clone(),
        dialogue,
    )))
}

#[cfg(not(feature = "telegram"))]
fn spawn_bot(config: &Config, _store: Arc<dyn PreferenceStore>) -> Option<JoinHandle<()>> {
    if config.telegram.enabled {
        warn!("Telegram enabled but this build lacks the `telegram` feature");
    }
    None
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{MemoryPreferenceStore, RecordingForwarder};

    fn config() -> Config {
        let lookup = |name: &str| match name {
            "SUPABASE_URL" => Some("https://abc.supabase.co".to_string()),
            "SUPABASE_KEY" => Some("service-key".to_string()),
            "N8N_WEBHOOK_URL" => Some("https://hook.example.com/signals".to_string()),
            _ => None,
        };
        Config::parse_toml_with("[telegram]\nenabled = false\n", lookup).unwrap()
    }

    #[test]
    fn components_build_from_config() {
        let components = build_components(&config()).unwrap();
        assert_eq!(components.store.store_name(), "supabase");
    }

    #[tokio::test]
    async fn state_wires_matcher_to_store() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let state = build_state(store.clone(), Arc::new(RecordingForwarder::new()));

        let result = state
            .matcher
            .match_signal(&crate::domain::Signal::new("EURUSD", "1h"))
            .await
            .unwrap();
        assert_eq!(result.subscriber_count, 0);
        assert_eq!(store.query_count(), 1);
    }
}
