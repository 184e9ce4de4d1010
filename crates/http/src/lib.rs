//! HTTP API server for the kokoro coaching backend.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod api_types;
mod blocking;
mod handlers;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use kokoro_service::{ChatService, GoalService, KpiService, ReportService, SessionService};
use kokoro_storage::Storage;

pub use api_error::ApiError;
pub use api_types::{HealthResponse, VersionResponse};

/// Shared application state for all HTTP handlers.
///
/// Service instances are wrapped in `Arc` so blocking handlers can move
/// clones onto the blocking thread pool.
pub struct AppState {
    pub storage: Arc<Storage>,
    pub session_service: Arc<SessionService>,
    pub chat_service: Arc<ChatService>,
    pub goal_service: Arc<GoalService>,
    pub report_service: Arc<ReportService>,
    pub kpi_service: Arc<KpiService>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/v1/users", post(handlers::users::create_user))
        .route("/api/v1/phase1/session", post(handlers::phase1::start_session))
        .route("/api/v1/phase1/session/{session_id}/turn", post(handlers::phase1::append_turn))
        .route("/api/v1/phase1/session/{session_id}/confirm", post(handlers::phase1::confirm_goal))
        .route("/api/v1/phase3/session", post(handlers::phase3::start_session))
        .route("/api/v1/phase3/session/{session_id}/turn", post(handlers::phase3::append_turn))
        .route(
            "/api/v1/phase3/session/{session_id}/report/draft",
            post(handlers::phase3::report_draft),
        )
        .route(
            "/api/v1/phase3/session/{session_id}/report/final",
            post(handlers::phase3::report_final),
        )
        .route("/api/v1/kpi/edit-ratio", get(handlers::kpi::edit_ratio))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness probe that also verifies the database answers.
async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ApiError> {
    let storage = Arc::clone(&state.storage);
    tokio::task::spawn_blocking(move || storage.ping())
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("join error: {e}")))?
        .map_err(|e| ApiError::Internal(e.into()))?;
    Ok(Json(HealthResponse { status: "ok", db: "ok" }))
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
