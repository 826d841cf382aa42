//! Shared wire types for the Realm session synchronization layer.
//!
//! Everything that crosses the boundary between the realm and its
//! participants is defined here, so the transport, the core and any
//! client agree on one shape. Types are exported to `TypeScript` via
//! `ts-rs` for web clients.
//!
//! # Modules
//!
//! - [`ids`] -- Integer participant identifiers
//! - [`enums`] -- Quality scale and catalog definition kinds
//! - [`structs`] -- Participants and their public projection
//! - [`records`] -- Portable records (chat, item, character, skill)
//! - [`packets`] -- Realm -> participant packets and participant commands
//! - [`snapshot`] -- Persistent whole-realm snapshot

pub mod enums;
pub mod ids;
pub mod packets;
pub mod records;
pub mod snapshot;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{DefinitionKind, QualityCategory};
pub use ids::ParticipantId;
pub use packets::{ClientCommand, Packet};
pub use records::{
    CharacterRecord, ItemRecord, MessageRecord, NO_QUALITY, NO_STUFF, SkillRecord, WireRecord,
};
pub use snapshot::RealmSnapshot;
pub use structs::{Participant, ParticipantSummary};

/// Revision of the realm data format.
///
/// Written into every snapshot and sync packet. A snapshot carrying any
/// other value is rejected on restore; there is no migration path.
pub const FORMAT_VERSION: &str = "0.4";
