//! HTTP error types.
//!
//! Maps intake and store errors into JSON responses. Every variant produces
//! a body with a machine-readable `error` field and a human-readable
//! `message`; a rejected submission additionally itemizes the violated
//! rules in reporting order.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use waitlist_core::error::IntakeError;
use waitlist_core::validator::Violation;

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// The submission failed validation.
    Rejected(Vec<Violation>),
    /// Client sent a request the handlers cannot interpret.
    BadRequest(String),
    /// Internal server error (storage failure).
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    violations: Vec<ViolationBody>,
}

/// One itemized validation failure.
#[derive(Serialize)]
struct ViolationBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message, violations) = match self {
            Self::Rejected(violations) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "rejected",
                "submission rejected".to_owned(),
                violations
                    .into_iter()
                    .map(|v| ViolationBody {
                        code: v.code(),
                        message: v.to_string(),
                    })
                    .collect(),
            ),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, Vec::new()),
            Self::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg,
                Vec::new(),
            ),
        };

        let body = ErrorBody {
            error: error_type,
            message,
            violations,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Rejected(violations) => Self::Rejected(violations),
            IntakeError::Store(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<waitlist_store::StoreError> for AppError {
    fn from(err: waitlist_store::StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}
