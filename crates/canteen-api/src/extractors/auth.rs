//! `AuthUser` extractor: the identity attached by the auth middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use canteen_auth::Identity;
use canteen_core::error::AppError;

use crate::error::ApiError;

/// Authenticated caller available in handlers.
///
/// Only usable on routes behind `require_auth`; elsewhere it rejects with 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Identity);

impl std::ops::Deref for AuthUser {
    type Target = Identity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .copied()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized("Authentication required").into())
    }
}
