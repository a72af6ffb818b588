//! Custom error types for the site service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for the site service
///
/// Client-visible bodies never say why authentication failed or which part
/// of an internal failure went wrong.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, tampered, or expired session token
    #[error("Unauthorized")]
    Unauthorized,

    /// Unexpected failure; `public` is sent to the client, `cause` is only logged
    #[error("{public}: {cause:#}")]
    Internal {
        public: &'static str,
        cause: anyhow::Error,
    },
}

impl ApiError {
    /// Wrap an unexpected failure behind a generic client message
    pub fn internal(public: &'static str, cause: impl Into<anyhow::Error>) -> Self {
        ApiError::Internal {
            public,
            cause: cause.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::Internal { public, cause } => {
                error!("{}: {:#}", public, cause);
                (StatusCode::INTERNAL_SERVER_ERROR, public.to_string())
            }
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
