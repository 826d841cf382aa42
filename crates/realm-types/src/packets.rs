//! Packets exchanged between the realm and its participants.
//!
//! [`Packet`] flows realm -> participant and [`ClientCommand`] flows
//! participant -> realm. Both are internally tagged with a `"type"` field
//! so new kinds can be added without disturbing existing peers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::ParticipantId;
use crate::records::{CharacterRecord, ItemRecord, MessageRecord};
use crate::structs::ParticipantSummary;

/// A payload delivered to one or more participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
#[non_exhaustive]
pub enum Packet {
    /// A chat message was posted.
    Chat {
        /// The posted message.
        message: MessageRecord,
    },
    /// A new participant joined the roster.
    ParticipantJoined {
        /// The newcomer.
        participant: ParticipantSummary,
    },
    /// A participant's connectivity or session flags changed.
    ParticipantStatus {
        /// The participant after the change.
        participant: ParticipantSummary,
    },
    /// Another participant sent an item.
    ItemTransfer {
        /// Sender.
        from: ParticipantId,
        /// The item snapshot.
        item: ItemRecord,
    },
    /// Another participant shared a character.
    CharacterTransfer {
        /// Sender.
        from: ParticipantId,
        /// The character snapshot.
        character: CharacterRecord,
    },
    /// Full public state of the realm, sent on join.
    RealmSync {
        /// Format revision of the sender.
        version: String,
        /// The whole roster, in insertion order.
        participants: Vec<ParticipantSummary>,
        /// The whole chat log, oldest first.
        chat: Vec<MessageRecord>,
    },
    /// A command from this participant was refused.
    Rejected {
        /// Human-readable cause.
        reason: String,
    },
}

impl Packet {
    /// Short name of the packet kind, for logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Chat { .. } => "chat",
            Self::ParticipantJoined { .. } => "participant_joined",
            Self::ParticipantStatus { .. } => "participant_status",
            Self::ItemTransfer { .. } => "item_transfer",
            Self::CharacterTransfer { .. } => "character_transfer",
            Self::RealmSync { .. } => "realm_sync",
            Self::Rejected { .. } => "rejected",
        }
    }
}

/// A request sent by a connected participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ClientCommand {
    /// Post a chat message.
    Chat {
        /// Message text.
        message: String,
    },
    /// Send an item to another participant.
    GiveItem {
        /// Recipient.
        to: ParticipantId,
        /// The item snapshot.
        item: ItemRecord,
    },
    /// Share a character with another participant.
    ShareCharacter {
        /// Recipient.
        to: ParticipantId,
        /// The character snapshot.
        character: CharacterRecord,
    },
    /// Enter or leave the running session.
    SetInGame {
        /// New value of the session flag.
        in_game: bool,
    },
}
