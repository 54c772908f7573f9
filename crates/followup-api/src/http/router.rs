//! Axum router configuration with middleware.
//!
//! Middleware: CORS, request tracing.

use axum::Json;
use axum::Router;
use axum::routing::{delete, get, post};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route(
            "/{session_id}/followups",
            get(handlers::followup::list_followups).delete(handlers::followup::delete_followups),
        )
        .route(
            "/{session_id}/followups/{followup_id}",
            delete(handlers::followup::delete_followup),
        )
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
