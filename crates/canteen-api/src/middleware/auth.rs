//! Bearer token authentication middleware.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use canteen_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects requests without a valid access token.
///
/// On success the caller's [`canteen_auth::Identity`] is stored in the
/// request extensions for the `AuthUser` extractor.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = authorization_header(request.headers())?;

    let identity = state.auth_gate.authenticate(header).map_err(|e| {
        debug!(path = %request.uri().path(), reason = %e.kind, "Request rejected by auth gate");
        e
    })?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Raw `Authorization` value. Non-ASCII values are rejected.
fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    headers
        .get(AUTHORIZATION)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| AppError::unauthorized("Malformed authorization header"))
        })
        .transpose()
}
