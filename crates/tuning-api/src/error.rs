//! Tuning API — error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tuning_catalog::CatalogError;

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The episode catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// An outbound HTTP client could not be built.
    #[error("http client error: {0}")]
    Client(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// Rejections of a webhook delivery.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The signature header is absent.
    #[error("missing X-Line-Signature header")]
    MissingSignature,

    /// The signature does not match the body.
    #[error("signature does not match request body")]
    InvalidSignature,

    /// The body is not a webhook payload.
    #[error("malformed webhook payload: {0}")]
    MalformedPayload(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_code = match &self {
            ApiError::MissingSignature => "missing_signature",
            ApiError::InvalidSignature => "invalid_signature",
            ApiError::MalformedPayload(_) => "malformed_payload",
        };

        let body = ErrorBody {
            error: error_code,
            message: self.to_string(),
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
