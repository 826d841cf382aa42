//! Shared application state for the realm server.
//!
//! [`AppState`] holds the one [`RealmStore`] behind a tokio [`Mutex`]
//! together with the [`ChannelDelivery`] registered as its transport.
//! Every roster mutation, chat append and broadcast happens while the
//! mutex is held, so packets reach each participant's queue in the order
//! the realm produced them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use realm_bridge::DefinitionCatalog;
use realm_core::{ChannelDelivery, Delivery, RealmStore};
use realm_types::Packet;
use tokio::sync::Mutex;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug)]
pub struct AppState {
    /// Human-readable realm name.
    pub name: String,
    /// The authoritative session.
    pub realm: Mutex<RealmStore>,
    /// Per-participant outbound queues, registered as the realm's delivery.
    pub outbound: Arc<ChannelDelivery<Packet>>,
    /// Capacity of each newly opened outbound queue.
    pub queue_capacity: usize,
    /// When the server started.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create state around an empty realm.
    pub fn new(
        name: impl Into<String>,
        catalog: Arc<DefinitionCatalog>,
        queue_capacity: usize,
    ) -> Self {
        Self::with_realm(name, RealmStore::new(catalog), queue_capacity)
    }

    /// Create state around an existing realm, such as a restored one.
    ///
    /// The realm's delivery is replaced with this state's outbound queues.
    pub fn with_realm(
        name: impl Into<String>,
        mut realm: RealmStore,
        queue_capacity: usize,
    ) -> Self {
        let outbound = Arc::new(ChannelDelivery::<Packet>::new());
        let delivery: Arc<dyn Delivery<Packet>> = outbound.clone();
        realm.register_delivery(delivery);
        Self {
            name: name.into(),
            realm: Mutex::new(realm),
            outbound,
            queue_capacity,
            started_at: Utc::now(),
        }
    }
}
