//! Auth handlers: sign-in, refresh-token, sign-out, me.

use axum::Json;
use axum::extract::State;

use canteen_core::error::AppError;

use crate::dto::request::{RefreshTokenRequest, SignInRequest};
use crate::dto::response::{IdentityResponse, MessageResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignInRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let tokens = state
        .session_manager
        .sign_in(&req.username, &req.password)
        .await?;

    Ok(Json(tokens.into()))
}

/// POST /api/auth/refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let tokens = state.session_manager.refresh(&req.refresh_token).await?;

    Ok(Json(tokens.into()))
}

/// POST /api/auth/sign-out
pub async fn sign_out(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.session_manager.sign_out(&req.refresh_token).await?;

    Ok(Json(MessageResponse {
        message: "Signed out successfully".to_string(),
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<IdentityResponse>, ApiError> {
    let role = state
        .accounts
        .find_role_by_id(auth.role_id)
        .await?
        .ok_or_else(|| AppError::role_not_found(format!("Role {} not found", auth.role_id)))?;

    Ok(Json(IdentityResponse {
        user_id: auth.user_id,
        role_id: auth.role_id,
        role: role.name,
    }))
}
