//! Axum router construction.
//!
//! Assembles the participant `WebSocket` and the read-only REST endpoints
//! into a single [`Router`] with CORS and request tracing.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- plain-text status line
/// - `GET /ws?name=..&key=..` -- participant session
/// - `GET /api/status` -- realm summary
/// - `GET /api/participants` -- roster in join order
/// - `GET /api/participants/{id}` -- single participant
/// - `GET /api/chat` -- chat log, oldest first
/// - `GET /api/snapshot` -- full realm snapshot with credentials redacted
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/ws", get(ws::ws_session))
        .route("/api/status", get(handlers::get_status))
        .route("/api/participants", get(handlers::list_participants))
        .route("/api/participants/{id}", get(handlers::get_participant))
        .route("/api/chat", get(handlers::list_chat))
        .route("/api/snapshot", get(handlers::get_snapshot))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
