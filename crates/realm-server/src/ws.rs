//! Participant `WebSocket` sessions.
//!
//! A client connects to `GET /ws?name=<name>&key=<credential hash>`. The
//! key is an opaque hash; the server compares it and never decodes it.
//! Joining with the name and key of a known participant reconnects that
//! participant, otherwise a new one is added.
//!
//! After the upgrade the session:
//!
//! 1. opens the participant's outbound queue,
//! 2. sends a [`Packet::RealmSync`] to the participant,
//! 3. announces the arrival to everyone else,
//! 4. forwards queued packets as JSON text frames and turns incoming
//!    [`ClientCommand`] frames into realm operations,
//! 5. on close, drops the queue and marks the participant disconnected.
//!
//! Steps 1 to 3 run under a single realm lock, so nothing broadcast in
//! between can overtake the sync packet.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use realm_core::RealmError;
use realm_types::{ClientCommand, Packet, ParticipantId};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for `GET /ws`.
#[derive(Debug, Deserialize)]
pub struct JoinQuery {
    /// Display name.
    pub name: String,
    /// Credential hash.
    pub key: String,
}

/// How a session loop ended.
enum Exit {
    /// The client went away.
    Closed,
    /// The outbound queue was closed from the realm side, normally because
    /// a newer session for the same participant took over.
    Superseded,
}

/// Upgrade an HTTP request to a participant session.
///
/// # Route
///
/// `GET /ws?name=..&key=..`
pub async fn ws_session(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<JoinQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if query.name.trim().is_empty() {
        return Err(ApiError::InvalidQuery(String::from("name must not be empty")));
    }
    if query.key.is_empty() {
        return Err(ApiError::InvalidQuery(String::from("key must not be empty")));
    }
    Ok(ws.on_upgrade(move |socket| handle_session(socket, state, query)))
}

async fn handle_session(mut socket: WebSocket, state: Arc<AppState>, query: JoinQuery) {
    let (id, rx) = match join(&state, &query).await {
        Ok(joined) => joined,
        Err(e) => {
            warn!(name = %query.name, error = %e, "Join failed");
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };

    let exit = run_session(&mut socket, &state, id, rx).await;
    leave(&state, id, &exit).await;
}

/// Connect, open the queue, sync and announce, all under one lock.
async fn join(
    state: &AppState,
    query: &JoinQuery,
) -> Result<(ParticipantId, mpsc::Receiver<Packet>), RealmError> {
    let mut realm = state.realm.lock().await;
    let connection = realm.connect(&query.name, &query.key)?;
    let id = connection.participant.id;

    let rx = state.outbound.register(id, state.queue_capacity);
    realm.sync_participant(id)?;
    realm.announce(&connection)?;

    info!(
        id = %id,
        name = %connection.participant.name,
        rejoined = connection.rejoined,
        "Participant session opened"
    );
    Ok((id, rx))
}

async fn run_session(
    socket: &mut WebSocket,
    state: &AppState,
    id: ParticipantId,
    mut rx: mpsc::Receiver<Packet>,
) -> Exit {
    loop {
        tokio::select! {
            // Packet queued by the realm for this participant.
            packet = rx.recv() => {
                let Some(packet) = packet else {
                    debug!(id = %id, "Outbound queue closed");
                    return Exit::Superseded;
                };
                let json = match serde_json::to_string(&packet) {
                    Ok(j) => j,
                    Err(e) => {
                        warn!(id = %id, kind = packet.kind(), "Failed to serialize packet: {e}");
                        continue;
                    }
                };
                if socket.send(Message::Text(json.into())).await.is_err() {
                    debug!(id = %id, "Client disconnected (send failed)");
                    return Exit::Closed;
                }
            }
            // Frame from the client.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_command(state, id, text.as_str()).await;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!(id = %id, "Client disconnected (pong failed)");
                            return Exit::Closed;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(id = %id, "Client disconnected");
                        return Exit::Closed;
                    }
                    Some(Err(e)) => {
                        debug!(id = %id, "WebSocket error: {e}");
                        return Exit::Closed;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }
}

/// Parse one client frame and apply it to the realm.
///
/// A refused command is answered with [`Packet::Rejected`] to the sender
/// only.
async fn handle_command(state: &AppState, id: ParticipantId, text: &str) {
    let command: ClientCommand = match serde_json::from_str(text) {
        Ok(command) => command,
        Err(e) => {
            debug!(id = %id, error = %e, "Unparseable client frame");
            reject(state, id, format!("unparseable command: {e}")).await;
            return;
        }
    };

    let mut realm = state.realm.lock().await;
    let result = match command {
        ClientCommand::Chat { message } => realm.post_message(id, message).map(|_| ()),
        ClientCommand::GiveItem { to, item } => realm.forward_item(id, to, item),
        ClientCommand::ShareCharacter { to, character } => {
            realm.forward_character(id, to, character)
        }
        ClientCommand::SetInGame { in_game } => realm.set_in_game(id, in_game).map(|_| ()),
    };

    if let Err(e) = result {
        warn!(id = %id, error = %e, "Command rejected");
        let packet = Packet::Rejected {
            reason: e.to_string(),
        };
        if let Err(e) = realm.notify(id, &packet) {
            debug!(id = %id, error = %e, "Rejection not delivered");
        }
    }
}

async fn reject(state: &AppState, id: ParticipantId, reason: String) {
    let realm = state.realm.lock().await;
    if let Err(e) = realm.notify(id, &Packet::Rejected { reason }) {
        debug!(id = %id, error = %e, "Rejection not delivered");
    }
}

/// Tear down after the session loop ends.
///
/// A superseded session leaves the participant connected; the newer
/// session owns the queue now.
async fn leave(state: &AppState, id: ParticipantId, exit: &Exit) {
    let mut realm = state.realm.lock().await;
    state.outbound.prune(id);

    if matches!(exit, Exit::Superseded) || state.outbound.is_registered(id) {
        debug!(id = %id, "Session superseded, participant stays connected");
        return;
    }

    match realm.set_connected(id, false) {
        Ok(report) => info!(id = %id, notified = report.delivered.len(), "Participant session closed"),
        Err(e) => warn!(id = %id, error = %e, "Failed to mark participant disconnected"),
    }
}
