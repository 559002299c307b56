//! Error types for pinguinos

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Common result type for pinguinos operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the sighting pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Vision service unreachable, returned non-success, or replied with
    /// content that does not parse as a biometric record
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Classifier artifact failed to load at startup; the classify path
    /// is disabled for the lifetime of the process
    #[error("Classifier model is not loaded")]
    ModelUnavailable,

    /// Persistence failure (wraps sqlx::Error). Recovered at the
    /// orchestration layer: writes are skipped, reads return empty.
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            Error::Upstream(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg),
            Error::ModelUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "MODEL_UNAVAILABLE",
                "classifier model is not loaded".to_string(),
            ),
            Error::Store(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORE_ERROR",
                err.to_string(),
            ),
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR", msg),
            Error::Io(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "IO_ERROR",
                err.to_string(),
            ),
            Error::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_maps_to_bad_gateway() {
        let response = Error::Upstream("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn model_unavailable_maps_to_service_unavailable() {
        let response = Error::ModelUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
