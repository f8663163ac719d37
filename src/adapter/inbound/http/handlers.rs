use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use super::dto::{HealthResponse, MatchResponse, SignalRequest};
use super::{ApiError, AppState};

/// POST /match-subscribers
pub async fn match_subscribers(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SignalRequest>, JsonRejection>,
) -> Result<Json<MatchResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::invalid_request(e.body_text()))?;
    let signal = request.into_signal()?;

    info!(
        instrument = %signal.instrument,
        timeframe = %signal.timeframe,
        "Finding subscribers for signal"
    );

    let result = state.matcher.match_signal(&signal).await?;
    state.dispatcher.dispatch(result.clone());

    Ok(Json(MatchResponse::success(result)))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
