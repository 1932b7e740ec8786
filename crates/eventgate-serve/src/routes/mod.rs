//! API route definitions.

mod docs;
mod events;
mod health;
mod publish;

use axum::Router;
use axum::routing::{get, post};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the complete API router.
///
/// # Route Structure
///
/// - `POST /publish` - Accept a JSON payload and enqueue it
/// - `GET /events` - Most recent events (optional `?limit=N`)
/// - `GET /events/count` - Total event count
/// - `GET /health` - Dependency connectivity check
/// - `GET /` - API documentation
///
/// Unknown routes fall through to a JSON 404.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(docs::index))
        .route("/publish", post(publish::publish_event))
        .route("/events", get(events::list_events))
        .route("/events/count", get(events::count_events))
        .route("/health", get(health::health_check))
        .fallback(fallback)
        .with_state(state)
}

/// JSON 404 for any route not listed above.
async fn fallback() -> ApiError {
    ApiError::NotFound("Endpoint not found".to_string())
}
