//! Uniform JSON response envelope.
//!
//! # Responsibility
//! - Wrap every success as `{ "ok": true, "data": ... }`.
//! - Wrap every failure as `{ "ok": false, "kind": ..., "message": ... }`.
//!
//! # Invariants
//! - Client messages come from `ServiceError::public_message` and never carry
//!   paths or backend detail; the full error is logged instead.
//! - Status: 404 for not-found, 400 for invalid input, 500 otherwise.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use phrygian_core::{ErrorKind, ServiceError};
use serde::Serialize;

pub type ApiResult<T> = Result<Success<T>, ApiError>;

#[derive(Debug, Serialize)]
struct SuccessBody<T> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct FailureBody<'a> {
    ok: bool,
    kind: &'a str,
    message: &'a str,
}

/// Successful response payload.
#[derive(Debug)]
pub struct Success<T>(pub T);

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            Json(SuccessBody {
                ok: true,
                data: self.0,
            }),
        )
            .into_response()
    }
}

/// Failed response payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: ErrorKind::InvalidInput.as_str(),
            message: message.into(),
        }
    }

    /// Failure outside the service taxonomy, e.g. a crashed blocking task.
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: "internal",
            message: "Internal server error".to_string(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let kind = err.kind();
        let status = match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::StorageRead | ErrorKind::StorageWrite | ErrorKind::CatalogUnavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            error!(
                "event=api_error module=api status=error error_code={} error={}",
                kind.as_str(),
                err
            );
        } else {
            warn!(
                "event=api_error module=api status=rejected error_code={} error={}",
                kind.as_str(),
                err
            );
        }

        Self {
            status,
            kind: kind.as_str(),
            message: err.public_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(FailureBody {
                ok: false,
                kind: self.kind,
                message: &self.message,
            }),
        )
            .into_response()
    }
}
