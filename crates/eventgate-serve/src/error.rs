//! API error types and response formatting.
//!
//! Every failure a handler can hit is converted here into a JSON body with
//! an `error` field; callers never see a bare transport-level failure, and
//! the status code separates client-caused (400/404) from dependency-caused
//! (500) failures.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::clients::ClientError;

/// API error type that converts to appropriate HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid request input (missing body, malformed JSON, bad parameter).
    #[error("{0}")]
    BadRequest(String),

    /// Unknown route.
    #[error("{0}")]
    NotFound(String),

    /// A queue or store call failed. Surfaced with the underlying message;
    /// the gateway never retries on the caller's behalf.
    #[error("{0}")]
    Dependency(#[from] ClientError),

    /// Anything unexpected. The message is redacted from the response.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Dependency(err) => {
                tracing::error!(error = %err, "dependency call failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn error_display_bad_request() {
        let err = ApiError::BadRequest("No JSON data provided".to_string());
        assert_eq!(err.to_string(), "No JSON data provided");
    }

    #[test]
    fn error_display_dependency_carries_client_message() {
        let err: ApiError = ClientError::Transport("connection refused".to_string()).into();
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn error_into_response_bad_request() {
        let response = ApiError::BadRequest("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_into_response_not_found() {
        let response = ApiError::NotFound("Endpoint not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_into_response_dependency() {
        let response =
            ApiError::from(ClientError::Timeout(Duration::from_secs(10))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_into_response_internal() {
        let response = ApiError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
