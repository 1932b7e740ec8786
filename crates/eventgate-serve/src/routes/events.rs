//! Event read endpoints backed by the analytical store.

use axum::Json;
use axum::extract::{Query, State};
use metrics::counter;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use eventgate_core::{DEFAULT_EVENT_LIMIT, MAX_EVENT_LIMIT, decode_event_data, format_timestamp};

use crate::clients::StoredEvent;
use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the event list.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEventsQuery {
    /// Maximum number of events to return (default: 100, max: 1000).
    ///
    /// Carried as a string so a non-numeric value maps to the JSON 400 the
    /// contract requires rather than a plain-text query rejection.
    pub limit: Option<String>,
}

/// One event as the API returns it.
#[derive(Debug, Clone, Serialize)]
pub struct ApiEvent {
    pub event_id: String,
    /// Structured payload when the stored string parses as JSON; the raw
    /// string otherwise.
    pub event_data: Value,
    /// RFC 3339 UTC timestamp.
    pub timestamp: String,
}

impl From<StoredEvent> for ApiEvent {
    fn from(row: StoredEvent) -> Self {
        Self {
            event_id: row.event_id,
            event_data: decode_event_data(&row.event_data),
            timestamp: format_timestamp(row.timestamp),
        }
    }
}

/// Event list response.
#[derive(Debug, Clone, Serialize)]
pub struct ListEventsResponse {
    pub events: Vec<ApiEvent>,
    /// Length of `events` (may be 0).
    pub count: usize,
}

/// `GET /events`
///
/// Returns the most recent events, newest first. Ordering is enforced by
/// the store query; the handler only shapes rows for the response.
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListEventsQuery>,
) -> Result<Json<ListEventsResponse>, ApiError> {
    let limit = parse_limit(params.limit.as_deref())?;

    let rows = match state.store.recent_events(limit).await {
        Ok(rows) => rows,
        Err(e) => {
            counter!("gateway_query_errors_total").increment(1);
            return Err(e.into());
        }
    };

    let events: Vec<ApiEvent> = rows.into_iter().map(ApiEvent::from).collect();
    counter!("gateway_events_served_total").increment(events.len() as u64);

    let count = events.len();
    Ok(Json(ListEventsResponse { events, count }))
}

/// Event count response.
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub total_events: u64,
}

/// `GET /events/count`
///
/// Returns the total number of events in the store.
pub async fn count_events(State(state): State<AppState>) -> Result<Json<CountResponse>, ApiError> {
    let total_events = match state.store.count_events().await {
        Ok(count) => count,
        Err(e) => {
            counter!("gateway_query_errors_total").increment(1);
            return Err(e.into());
        }
    };

    Ok(Json(CountResponse { total_events }))
}

/// Parse and clamp the caller-supplied limit.
///
/// Absent means the default; anything above the ceiling is clamped down;
/// non-numeric input is a client error.
fn parse_limit(raw: Option<&str>) -> Result<u32, ApiError> {
    match raw {
        None => Ok(DEFAULT_EVENT_LIMIT),
        Some(raw) => raw
            .parse::<u32>()
            .map(|limit| limit.min(MAX_EVENT_LIMIT))
            .map_err(|_| ApiError::BadRequest(format!("invalid limit parameter: '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_parse_limit_defaults_when_absent() {
        assert_eq!(parse_limit(None).unwrap(), 100);
    }

    #[test]
    fn test_parse_limit_passes_small_values() {
        assert_eq!(parse_limit(Some("5")).unwrap(), 5);
        assert_eq!(parse_limit(Some("0")).unwrap(), 0);
    }

    #[test]
    fn test_parse_limit_clamps_to_ceiling() {
        assert_eq!(parse_limit(Some("5000")).unwrap(), 1000);
        assert_eq!(parse_limit(Some("1000")).unwrap(), 1000);
    }

    #[test]
    fn test_parse_limit_rejects_non_numeric() {
        assert!(parse_limit(Some("abc")).is_err());
        assert!(parse_limit(Some("-5")).is_err());
        assert!(parse_limit(Some("1.5")).is_err());
    }

    #[test]
    fn test_api_event_decodes_stored_json_string() {
        let row = StoredEvent {
            event_id: "id-1".to_string(),
            event_data: r#"{"page":"/home"}"#.to_string(),
            timestamp: DateTime::from_timestamp(1_754_000_000, 0).unwrap(),
        };

        let event = ApiEvent::from(row);
        assert_eq!(event.event_data["page"], "/home");
        assert!(event.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_api_event_keeps_unparseable_payload_as_string() {
        let row = StoredEvent {
            event_id: "id-2".to_string(),
            event_data: "plain text".to_string(),
            timestamp: DateTime::from_timestamp(1_754_000_000, 0).unwrap(),
        };

        let event = ApiEvent::from(row);
        assert_eq!(event.event_data, Value::String("plain text".to_string()));
    }
}
