//! API documentation root.

use axum::Json;
use serde_json::{Value, json};

/// `GET /`
///
/// Static JSON document describing the API surface, with one example
/// publish body.
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "eventgate",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /publish": "Publish a JSON event payload to the ingestion queue",
            "GET /events": "List recently ingested events (optional ?limit=N, max 1000)",
            "GET /events/count": "Total number of ingested events",
            "GET /health": "Service and dependency health",
            "GET /": "This document"
        },
        "example_publish": {
            "user_id": "12345",
            "action": "page_view",
            "page": "/home"
        }
    }))
}
