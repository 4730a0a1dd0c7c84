//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use canteen_core::error::{AppError, ErrorKind};

/// Message returned in place of any server-side failure detail.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// An `AppError` on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized
        | ErrorKind::InvalidCredentials
        | ErrorKind::TokenExpired
        | ErrorKind::TokenInvalid => StatusCode::UNAUTHORIZED,
        ErrorKind::AccountDisabled => StatusCode::FORBIDDEN,
        ErrorKind::AccountNotFound | ErrorKind::RoleNotFound | ErrorKind::TokenNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorKind::Store | ErrorKind::Configuration | ErrorKind::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        let body = if err.kind.is_server_error() {
            tracing::error!(
                kind = %err.kind,
                error = %err.message,
                cause = ?err.source,
                "Internal server error"
            );
            ApiErrorResponse {
                error: "INTERNAL_ERROR".to_string(),
                message: INTERNAL_MESSAGE.to_string(),
            }
        } else {
            ApiErrorResponse {
                error: err.kind.to_string(),
                message: err.message,
            }
        };

        (status, Json(body)).into_response()
    }
}
