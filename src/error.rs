// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 400 Bad Request (malformed request, caught before any write)
    Validation(String),

    // 400 Bad Request (submission with zero answers)
    EmptySubmission,

    // 422 Unprocessable Entity (answer/option/question mismatch)
    InvalidAnswer(String),

    // 404 Not Found (unknown test id)
    NotFound(String),

    // 500 (referential integrity gap between selected aptitudes and catalog)
    CatalogLookup(String),

    // 500 (transactional failure during submit, wraps the cause)
    SubmissionFailed(String),

    // 500 Internal Server Error
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
/// Server-side causes are logged and replaced by a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::EmptySubmission => {
                (StatusCode::BAD_REQUEST, "No answers submitted".to_string())
            }
            AppError::InvalidAnswer(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::CatalogLookup(msg) => {
                tracing::error!("Catalog lookup failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::SubmissionFailed(msg) => {
                tracing::error!("Submission failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Submission failed".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::Internal`.
/// Allows using `?` operator on database queries outside the submit
/// transaction, which wraps its own failures as `SubmissionFailed`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(err.to_string())
    }
}
