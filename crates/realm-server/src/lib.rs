//! Session server for the Realm.
//!
//! This crate puts one [`RealmStore`](realm_core::RealmStore) on the
//! network:
//!
//! - **`WebSocket` endpoint** (`/ws`) where each participant holds a
//!   session, receives packets from its bounded outbound queue and sends
//!   commands back
//! - **REST endpoints** for read-only inspection of the roster, the chat
//!   log and the realm snapshot
//!
//! # Architecture
//!
//! The realm sits behind a single tokio mutex in [`AppState`]. Its
//! registered delivery is a [`ChannelDelivery`](realm_core::ChannelDelivery),
//! so a broadcast only pushes into per-participant queues while the lock
//! is held; each session task drains its own queue onto its socket. A
//! slow client therefore fills its own queue and never stalls anyone
//! else.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use error::{ApiError, ServerError};
pub use router::build_router;
pub use server::{ServerConfig, start_server};
pub use state::AppState;
