//! Health check endpoint

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response with degradation flags
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub classifier_loaded: bool,
    pub store_connected: bool,
}

/// GET /health
///
/// Reports "degraded" (still HTTP 200) when the classifier artifact or
/// the result store is unavailable; both modes keep the service up.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let classifier_loaded = state.classifier.is_some();
    let store_connected = state.db.as_ref().is_some_and(|pool| !pool.is_closed());

    let status = if classifier_loaded && store_connected {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        module: "pinguinos".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        classifier_loaded,
        store_connected,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
