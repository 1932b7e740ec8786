//! Error types for the eventgate pipeline.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling or encoding envelopes.
#[derive(Error, Debug)]
pub enum Error {
    /// The caller supplied a `null` payload. Envelopes carry a real JSON
    /// value or nothing at all.
    #[error("event payload is null")]
    NullPayload,

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_payload_display() {
        let err = Error::NullPayload;
        assert_eq!(err.to_string(), "event payload is null");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_result_type_ok() {
        let result: Result<i32> = Ok(42);
        assert!(matches!(result, Ok(42)));
    }
}
