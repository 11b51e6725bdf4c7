//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use domain_restatement::RestatementError;
use domain_tariff::TariffError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A series provider failed in a way worth retrying
    #[error("Upstream unavailable: {0}")]
    Upstream(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone()),
            ApiError::Upstream(msg) => (StatusCode::SERVICE_UNAVAILABLE, "upstream_unavailable", msg.clone()),
        };

        if status.is_server_error() {
            warn!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<RestatementError> for ApiError {
    fn from(err: RestatementError) -> Self {
        match err {
            RestatementError::Series(ref port) if port.is_not_found() => ApiError::NotFound(err.to_string()),
            RestatementError::Series(ref port) if port.is_transient() => ApiError::Upstream(err.to_string()),
            ref e if e.is_client_error() => ApiError::Validation(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<TariffError> for ApiError {
    fn from(err: TariffError) -> Self {
        match err {
            TariffError::InvalidRule { .. } | TariffError::DuplicateRule(_) => {
                ApiError::Validation(err.to_string())
            }
            TariffError::UnknownRegion(_) | TariffError::UnknownCategory(_) => {
                ApiError::NotFound(err.to_string())
            }
        }
    }
}
