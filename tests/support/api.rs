use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use signal_relay::adapter::inbound::http::create_router;
use signal_relay::infrastructure::bootstrap::build_state;
use signal_relay::port::{MatchForwarder, PreferenceStore};
use signal_relay::testkit::{MemoryPreferenceStore, RecordingForwarder};

pub fn router(store: Arc<MemoryPreferenceStore>, forwarder: Arc<RecordingForwarder>) -> Router {
    create_router(build_state(store, forwarder))
}

/// Router over arbitrary adapters, e.g. the real HTTP clients.
pub fn router_with(store: Arc<dyn PreferenceStore>, forwarder: Arc<dyn MatchForwarder>) -> Router {
    create_router(build_state(store, forwarder))
}

pub async fn post_raw(router: Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    send(router, request).await
}

pub async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(router, uri, body.to_string()).await
}

pub async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
