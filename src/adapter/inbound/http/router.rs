use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::application::{ForwardDispatcher, SignalMatcher};

/// Application state shared across handlers.
pub struct AppState {
    pub matcher: SignalMatcher,
    pub dispatcher: ForwardDispatcher,
}

impl AppState {
    pub fn new(matcher: SignalMatcher, dispatcher: ForwardDispatcher) -> Self {
        Self {
            matcher,
            dispatcher,
        }
    }
}

/// Create the REST API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/match-subscribers", post(handlers::match_subscribers))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
