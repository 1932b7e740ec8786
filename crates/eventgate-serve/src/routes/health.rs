//! Health check endpoint.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;

use eventgate_core::format_timestamp;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    project_id: String,
    pubsub_topic: String,
    timestamp: String,
}

/// Unhealthy response body.
#[derive(Debug, Clone, Serialize)]
struct UnhealthyResponse {
    status: &'static str,
    error: String,
}

/// `GET /health`
///
/// Runs one trivial round trip against the analytical store to confirm
/// connectivity. Every failure is caught here and mapped to a 500 body;
/// nothing propagates past this handler.
pub async fn health_check(State(state): State<AppState>) -> Response {
    match state.store.probe().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                project_id: state.config.project_id.clone(),
                pubsub_topic: state.config.topic.clone(),
                timestamp: format_timestamp(Utc::now()),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "health probe failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(UnhealthyResponse {
                    status: "unhealthy",
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
