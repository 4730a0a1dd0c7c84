//! Route definitions for the canteen HTTP API.
//!
//! All routes are mounted under `/api`. Routes in [`protected_routes`]
//! sit behind the bearer token middleware.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Upper bound for request bodies.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the Axum router with all routes and the per-route middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(health_routes())
        .merge(protected_routes(state.clone()));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Public auth endpoints: sign-in, refresh-token, sign-out
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-in", post(handlers::auth::sign_in))
        .route("/auth/refresh-token", post(handlers::auth::refresh_token))
        .route("/auth/sign-out", post(handlers::auth::sign_out))
}

/// Endpoints requiring a valid access token
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
