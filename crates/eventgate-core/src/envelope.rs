//! The event envelope and its wire encoding.
//!
//! An envelope is the three-field structure carried from the ingestion
//! gateway through the queue into the analytical store: `event_id`,
//! `event_data`, `timestamp`. The gateway assigns the id and the timestamp;
//! `event_data` is an opaque JSON value that is never inspected or
//! rewritten in transit.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Error, Result};

/// The wire envelope published to the queue.
///
/// Serialized as:
/// `{"event_id":"<uuid>","event_data":<any JSON value>,"timestamp":"<RFC 3339 Z>"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Globally unique id assigned at publish time. Immutable; the sole
    /// correlation key between the publish path and the query path.
    pub event_id: String,
    /// Caller-supplied payload, passed through untouched.
    pub event_data: Value,
    /// Ingestion instant, UTC, RFC 3339 with a trailing `Z`.
    pub timestamp: String,
}

impl EventEnvelope {
    /// Wrap a payload in a fresh envelope with a new UUID v4 id and the
    /// current UTC instant.
    ///
    /// Ids are random, never derived from the payload; publishing the same
    /// payload twice yields two distinct envelopes.
    pub fn new(event_data: Value) -> Result<Self> {
        if event_data.is_null() {
            return Err(Error::NullPayload);
        }

        Ok(Self {
            event_id: Uuid::new_v4().to_string(),
            event_data,
            timestamp: format_timestamp(Utc::now()),
        })
    }

    /// Serialize the envelope for transport.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Format an instant the way the envelope carries it: UTC, RFC 3339,
/// microsecond precision, explicit `Z` suffix.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Decode `event_data` as it comes back from the analytical store.
///
/// The store hands the payload back as a string column. If that string is
/// itself valid JSON the structured value is returned; otherwise the raw
/// string is kept as-is. The fallback is silent and never fails.
pub fn decode_event_data(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_assigns_uuid_and_utc_timestamp() {
        let envelope = EventEnvelope::new(json!({"user_id": "12345"})).unwrap();

        // Canonical hyphenated UUID is 36 characters
        assert_eq!(envelope.event_id.len(), 36);
        assert!(Uuid::parse_str(&envelope.event_id).is_ok());
        assert!(envelope.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_new_rejects_null_payload() {
        let result = EventEnvelope::new(Value::Null);
        assert!(matches!(result, Err(Error::NullPayload)));
    }

    #[test]
    fn test_identical_payloads_get_distinct_ids() {
        let a = EventEnvelope::new(json!({"action": "click"})).unwrap();
        let b = EventEnvelope::new(json!({"action": "click"})).unwrap();
        assert_ne!(a.event_id, b.event_id);
    }

    #[test]
    fn test_payload_round_trips_untouched() {
        let payload = json!({
            "user_id": "12345",
            "nested": {"list": [1, 2, 3], "flag": true}
        });
        let envelope = EventEnvelope::new(payload.clone()).unwrap();

        let bytes = envelope.to_bytes().unwrap();
        let decoded: EventEnvelope = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(decoded, envelope);
        assert_eq!(decoded.event_data, payload);
    }

    #[test]
    fn test_format_timestamp_has_z_suffix() {
        let instant = DateTime::from_timestamp(1_754_000_000, 123_456_000).unwrap();
        let formatted = format_timestamp(instant);
        assert!(formatted.ends_with('Z'));
        assert!(formatted.contains('T'));
    }

    #[test]
    fn test_decode_event_data_parses_json_strings() {
        let decoded = decode_event_data(r#"{"test_key":"test_value"}"#);
        assert_eq!(decoded, json!({"test_key": "test_value"}));
    }

    #[test]
    fn test_decode_event_data_keeps_raw_string_on_parse_failure() {
        let decoded = decode_event_data("not json at all");
        assert_eq!(decoded, Value::String("not json at all".to_string()));
    }

    #[test]
    fn test_decode_event_data_handles_scalars() {
        assert_eq!(decode_event_data("42"), json!(42));
        assert_eq!(decode_event_data("[1,2]"), json!([1, 2]));
    }
}
