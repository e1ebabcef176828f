//! Health check handlers

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: bool,
    pub queue: bool,
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.store().ping().await.is_ok();
    let queue = state.dispatcher().is_available().await;

    let (status, label) = if database && queue {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
            queue,
        }),
    )
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
