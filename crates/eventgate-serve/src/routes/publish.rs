//! Publish endpoint: the write half of the gateway.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use metrics::counter;
use serde::Serialize;
use serde_json::Value;

use eventgate_core::EventEnvelope;

use crate::error::ApiError;
use crate::state::AppState;

/// Publish response.
#[derive(Debug, Clone, Serialize)]
pub struct PublishResponse {
    /// Delivery id assigned by the queue.
    pub message_id: String,
    pub status: &'static str,
    /// Gateway-assigned envelope id; the caller's correlation key for the
    /// query path.
    pub event_id: String,
}

/// `POST /publish`
///
/// Wraps the request body in an envelope (fresh UUID id, current UTC
/// timestamp) and enqueues it on the configured topic. The response is sent
/// only after the queue acknowledges the message.
///
/// Delivery is at-least-once from the caller's perspective: if the
/// acknowledgement is lost after the queue already accepted the message,
/// the caller sees a 500 for an event that was in fact enqueued.
pub async fn publish_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PublishResponse>, ApiError> {
    let payload: Value = serde_json::from_slice(&body).map_err(|_| rejected())?;

    let envelope = EventEnvelope::new(payload).map_err(|_| rejected())?;
    let bytes = envelope
        .to_bytes()
        .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?;

    let message_id = match state.publisher.publish(&bytes).await {
        Ok(id) => id,
        Err(e) => {
            counter!("gateway_publish_errors_total").increment(1);
            return Err(e.into());
        }
    };

    counter!("gateway_publish_total").increment(1);
    counter!("gateway_publish_bytes_total").increment(bytes.len() as u64);
    tracing::debug!(
        event_id = %envelope.event_id,
        message_id = %message_id,
        "event published"
    );

    Ok(Json(PublishResponse {
        message_id,
        status: "published",
        event_id: envelope.event_id,
    }))
}

/// Rejection for a missing, undecodable, or null body.
fn rejected() -> ApiError {
    counter!("gateway_rejected_payloads_total").increment(1);
    ApiError::BadRequest("No JSON data provided".to_string())
}
