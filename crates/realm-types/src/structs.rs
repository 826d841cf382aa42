//! Participant structs.
//!
//! A [`Participant`] is created once when someone joins a realm and is
//! never deleted. Losing the connection flips [`Participant::connected`]
//! rather than removing the roster entry, so every chat message keeps a
//! resolvable author.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::ParticipantId;

/// A member of the realm roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Participant {
    /// Roster-allocated id, strictly increasing and never reused.
    pub id: ParticipantId,
    /// Display name.
    pub name: String,
    /// Opaque credential hash. Compared, never decoded.
    #[serde(rename = "hashedKey")]
    pub hashed_key: String,
    /// Whether the participant currently has a live connection.
    pub connected: bool,
    /// Whether the participant is active in the running session.
    #[serde(rename = "inGame")]
    pub in_game: bool,
    /// Client preferences, opaque to the realm.
    #[serde(default)]
    pub preferences: serde_json::Value,
    /// When the participant first joined.
    #[serde(rename = "joinedAt")]
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    /// Project the participant onto the form shared with peers.
    pub fn summary(&self) -> ParticipantSummary {
        ParticipantSummary {
            id: self.id,
            name: self.name.clone(),
            connected: self.connected,
            in_game: self.in_game,
        }
    }
}

/// Public view of a [`Participant`].
///
/// This is what other participants see; it never carries the credential
/// hash or the preferences blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ParticipantSummary {
    /// Roster id.
    pub id: ParticipantId,
    /// Display name.
    pub name: String,
    /// Connectivity flag.
    pub connected: bool,
    /// Session activity flag.
    #[serde(rename = "inGame")]
    pub in_game: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn participant() -> Participant {
        Participant {
            id: ParticipantId(3),
            name: String::from("Alice"),
            hashed_key: String::from("h1"),
            connected: true,
            in_game: false,
            preferences: serde_json::json!({ "theme": "dark" }),
            joined_at: Utc::now(),
        }
    }

    #[test]
    fn summary_drops_credentials() {
        let summary = participant().summary();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "Alice");
        assert!(json.get("hashedKey").is_none());
        assert!(json.get("preferences").is_none());
    }

    #[test]
    fn participant_keeps_opaque_preferences() {
        let original = participant();
        let json = serde_json::to_string(&original).unwrap();
        let restored: Participant = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
        assert_eq!(restored.preferences["theme"], "dark");
    }
}
