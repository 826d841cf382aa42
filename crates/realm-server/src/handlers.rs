//! REST API endpoint handlers.
//!
//! All handlers take the realm lock briefly and return a JSON projection.
//! Nothing here mutates the realm; participants act through the
//! `WebSocket` session.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Plain-text status line |
//! | `GET` | `/api/status` | Realm summary |
//! | `GET` | `/api/participants` | Roster in join order |
//! | `GET` | `/api/participants/{id}` | Single participant |
//! | `GET` | `/api/chat` | Chat log, oldest first |
//! | `GET` | `/api/snapshot` | Realm snapshot, credentials redacted |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use chrono::Utc;
use realm_core::RealmError;
use realm_types::{FORMAT_VERSION, ParticipantId};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

/// One-line status for humans and load balancers.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let realm = state.realm.lock().await;
    format!(
        "{} -- format {FORMAT_VERSION}, {} participants, {} messages\n",
        state.name,
        realm.roster().len(),
        realm.chat().len(),
    )
}

// ---------------------------------------------------------------------------
// GET /api/status
// ---------------------------------------------------------------------------

/// Realm summary: name, format revision, roster and log sizes, uptime.
pub async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let realm = state.realm.lock().await;
    let connected = realm.roster().iter().filter(|p| p.connected).count();
    let uptime_secs = Utc::now()
        .signed_duration_since(state.started_at)
        .num_seconds()
        .max(0);

    Json(serde_json::json!({
        "name": state.name,
        "version": FORMAT_VERSION,
        "participants": realm.roster().len(),
        "connected": connected,
        "open_queues": state.outbound.len(),
        "messages": realm.chat().len(),
        "catalog": {
            "things": realm.catalog().thing_count(),
            "skills": realm.catalog().skill_count(),
        },
        "uptime_secs": uptime_secs,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/participants
// ---------------------------------------------------------------------------

/// Every participant ever added, in join order.
pub async fn list_participants(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let realm = state.realm.lock().await;
    let participants = realm.roster().summaries();

    Json(serde_json::json!({
        "count": participants.len(),
        "participants": participants,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/participants/{id}
// ---------------------------------------------------------------------------

/// A single participant's public projection.
pub async fn get_participant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let realm = state.realm.lock().await;
    let participant = realm
        .roster()
        .find(ParticipantId(id))
        .map_err(RealmError::from)?;

    Ok(Json(participant.summary()))
}

// ---------------------------------------------------------------------------
// GET /api/chat
// ---------------------------------------------------------------------------

/// The chat log as wire records.
pub async fn list_chat(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let realm = state.realm.lock().await;
    let messages = realm.chat().records();

    Json(serde_json::json!({
        "count": messages.len(),
        "messages": messages,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/snapshot
// ---------------------------------------------------------------------------

/// The full realm snapshot with every credential hash blanked.
pub async fn get_snapshot(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut snapshot = state.realm.lock().await.snapshot();
    for user in &mut snapshot.users {
        user.hashed_key.clear();
    }
    Json(snapshot)
}
