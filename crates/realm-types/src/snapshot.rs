//! Persistent form of a whole realm.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::records::MessageRecord;
use crate::structs::Participant;

/// Everything needed to rebuild a realm: roster, chat log and the id
/// allocator's position.
///
/// Unlike [`Packet::RealmSync`](crate::Packet::RealmSync) this carries
/// credential hashes and is meant for storage, not for peers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RealmSnapshot {
    /// Format revision the snapshot was written with.
    pub version: String,
    /// Roster in insertion order.
    pub users: Vec<Participant>,
    /// Chat log, oldest first.
    pub chat: Vec<MessageRecord>,
    /// Last id handed out by the allocator, `0` if none.
    #[serde(rename = "lastUserGivenId")]
    pub last_user_given_id: u64,
}
