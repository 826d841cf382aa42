//! Session state and packet fan-out for the Realm.
//!
//! A realm is one shared session: an append-only roster of participants,
//! an append-only chat log whose messages reference participants by id,
//! and a dispatcher that hands packets to whatever transport the host
//! registers.
//!
//! # Modules
//!
//! - [`roster`] -- Append-only participant arena and id allocator.
//! - [`chat`] -- Chat messages and the append-only log.
//! - [`dispatch`] -- [`Delivery`] seam and the payload-generic
//!   [`Dispatcher`].
//! - [`outbound`] -- [`ChannelDelivery`], bounded per-participant queues.
//! - [`realm`] -- [`RealmStore`], the session-wide owner of all of the above.
//! - [`config`] -- Configuration loading from `realm-config.yaml`.
//! - [`error`] -- Error types.
//!
//! [`Delivery`]: dispatch::Delivery
//! [`Dispatcher`]: dispatch::Dispatcher
//! [`ChannelDelivery`]: outbound::ChannelDelivery
//! [`RealmStore`]: realm::RealmStore

pub mod chat;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod outbound;
pub mod realm;
pub mod roster;

pub use chat::{ChatLog, ChatMessage};
pub use config::{ConfigError, RealmConfig};
pub use dispatch::{Delivery, DeliveryReport, Dispatcher};
pub use error::{DeliveryFailure, DispatchError, ParseError, RealmError};
pub use outbound::ChannelDelivery;
pub use realm::{Connection, RealmStore};
pub use roster::{IdsExhausted, NotFound, Roster};
