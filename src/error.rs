//! Error types for the backend subsystem and the HTTP layer.
//!
//! [`BackendError`] covers configuration resolution, Postgres connectivity,
//! schema bootstrap, and password hashing. [`ApiError`] is the error type
//! returned by Axum handlers; each variant maps to an HTTP status code and a
//! structured JSON error response.

use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// A single `CREATE TABLE` statement that failed during bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFailure {
    /// Name of the table whose creation failed.
    pub table: &'static str,
    /// Rendered database error.
    pub message: String,
}

impl fmt::Display for TableFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.table, self.message)
    }
}

/// Failures raised by the backend bootstrap and account subsystem.
///
/// Authentication failure is deliberately absent: a rejected login is a
/// plain `false` from [`crate::persistence::accounts::authenticate`].
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Missing or invalid configuration. Fatal to startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The Postgres server could not be reached or rejected the session.
    #[error("connection error: {0}")]
    Connection(String),

    /// One or more `CREATE TABLE` statements failed.
    #[error("schema error: {}", format_failures(.0))]
    Schema(Vec<TableFailure>),

    /// The password hashing primitive rejected its input.
    #[error("hashing error: {0}")]
    Hashing(String),

    /// A statement against an existing connection failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl BackendError {
    /// Returns `true` for errors that must abort the startup sequence.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Connection(_))
    }
}

fn format_failures(failures: &[TableFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid request: expected value at line 1 column 1"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Handler error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category       | HTTP Status                      |
/// |-----------|----------------|----------------------------------|
/// | 1000–1999 | Validation     | 400 Bad Request / 415            |
/// | 2000–2999 | Authentication | 401 Unauthorized                 |
/// | 3000–3999 | Server         | 500 Internal Server Error        |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body could not be parsed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request body was not declared as `application/json`.
    #[error("unsupported media type: expected application/json")]
    UnsupportedMediaType,

    /// Credentials were rejected. The message never says why.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::UnsupportedMediaType => 1002,
            Self::InvalidCredentials => 2001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => Self::UnsupportedMediaType,
            other => Self::InvalidRequest(other.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_every_failed_table() {
        let err = BackendError::Schema(vec![
            TableFailure {
                table: "events",
                message: "permission denied".to_string(),
            },
            TableFailure {
                table: "accounts",
                message: "permission denied".to_string(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "schema error: events: permission denied; accounts: permission denied"
        );
    }

    #[test]
    fn only_configuration_and_connection_are_fatal() {
        assert!(BackendError::Configuration("x".to_string()).is_fatal());
        assert!(BackendError::Connection("x".to_string()).is_fatal());
        assert!(!BackendError::Schema(Vec::new()).is_fatal());
        assert!(!BackendError::Hashing("x".to_string()).is_fatal());
        assert!(!BackendError::Storage("x".to_string()).is_fatal());
    }

    #[test]
    fn api_error_status_mapping() {
        assert_eq!(
            ApiError::InvalidRequest(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UnsupportedMediaType.status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::InvalidCredentials.error_code(), 2001);
    }

    #[test]
    fn backend_error_becomes_internal() {
        let api: ApiError = BackendError::Storage("boom".to_string()).into();
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.error_code(), 3000);
    }
}
