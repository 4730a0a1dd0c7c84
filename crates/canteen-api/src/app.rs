//! Application builder: wires router, middleware, and state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use canteen_auth::PasswordHasher;
use canteen_auth::bootstrap::ensure_admin;
use canteen_auth::session::SessionCleanup;
use canteen_core::config::AppConfig;
use canteen_core::error::AppError;
use canteen_core::traits::{Clock, SystemClock};
use canteen_database::DatabasePool;
use canteen_database::repositories::{SessionRepository, UserRepository};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    build_router(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the canteen server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting canteen server...");

    // ── Step 1: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
    let session_repo = Arc::new(SessionRepository::new(db.pool().clone()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // ── Step 2: First-run seeding ────────────────────────────────
    if let Some(admin) = &config.bootstrap.admin {
        let hasher = PasswordHasher::new(&config.auth);
        if ensure_admin(user_repo.as_ref(), &hasher, admin).await?.is_none() {
            tracing::debug!(username = %admin.username, "Bootstrap administrator already exists");
        }
    }

    // ── Step 3: Auth system ──────────────────────────────────────
    let app_state = AppState::new(config.clone(), user_repo, session_repo, clock)?;

    // ── Step 4: Expired session sweeper ──────────────────────────
    let cleanup_handle = if config.session.cleanup_interval_seconds > 0 {
        let cleanup = SessionCleanup::new(Arc::clone(app_state.session_manager.store()));
        Some(cleanup.spawn(Duration::from_secs(
            config.session.cleanup_interval_seconds,
        )))
    } else {
        None
    };

    // ── Step 5: HTTP server ──────────────────────────────────────
    let app = build_app(app_state);
    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(address = %addr, "Canteen server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }
    db.close().await;

    tracing::info!("Canteen server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
