//! HTTP error mapping.
//!
//! Converts [`crate::errors::Error`] into a status code and a JSON body. Server-side
//! failures are logged in full and answered with a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::Error;

/// Error codes carried in the `error` field of every error body.
pub mod error_codes {
    /// Entity or result set does not exist
    pub const NOT_FOUND: &str = "NOT_FOUND";
    /// Request is malformed or inconsistent
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    /// Unexpected server-side failure
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Error returned by every handler.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status of the response
    pub status: StatusCode,
    /// One of [`error_codes`]
    pub code: &'static str,
    /// Human readable message
    pub message: String,
}

/// JSON response body for errors.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error code
    pub error: String,
    /// Human readable message
    pub message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 404 with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_codes::NOT_FOUND, message)
    }

    /// 400 with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST, message)
    }

    /// 500 with a generic message.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "Internal server error",
        )
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        if !err.is_client_error() {
            error!("Request failed: {err}");
            return Self::internal();
        }
        match err {
            Error::InvalidId { .. } | Error::IdMismatch { .. } | Error::Validation { .. } => {
                Self::bad_request(err.to_string())
            }
            _ => Self::not_found(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.code.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Result type of JSON handlers.
pub type ApiResult<T> = Result<Json<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn test_not_found_mapping() {
        let api: ApiError = Error::InvalidCredentials.into();
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.message, "Invalid credentials");

        let api: ApiError = Error::NoPendingOrders { collaborator_id: 3 }.into();
        assert_eq!(api.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_mapping() {
        let api: ApiError = Error::IdMismatch {
            path_id: 1,
            body_id: 2,
        }
        .into();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.code, error_codes::BAD_REQUEST);
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let api: ApiError = Error::Database(DbErr::Custom("table Pedidos is locked".to_string())).into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "Internal server error");
        assert!(!api.message.contains("Pedidos"));
    }
}
