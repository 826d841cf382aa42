//! Identity and roster management.
//!
//! The roster is an append-only arena of [`Participant`]s in join order,
//! paired with a monotonic id allocator. Ids start at 1, go up by one per
//! join, and are never reused. There is deliberately no removal: losing a
//! connection flips [`Participant::connected`], so every id that ever
//! appeared in a chat message stays resolvable.

use chrono::Utc;
use realm_types::{Participant, ParticipantId, ParticipantSummary};
use tracing::info;

/// No participant with the given id exists in the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("participant not found: {0}")]
pub struct NotFound(pub ParticipantId);

/// The id allocator has handed out the largest representable id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("participant ids exhausted after {0}")]
pub struct IdsExhausted(pub ParticipantId);

/// The append-only participant list and its id allocator.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    /// Participants in insertion order. Ids are strictly increasing along
    /// the vector.
    participants: Vec<Participant>,
    /// Last id handed out, `0` before the first join.
    last_given_id: u64,
}

impl Roster {
    /// Create an empty roster.
    pub const fn new() -> Self {
        Self {
            participants: Vec::new(),
            last_given_id: 0,
        }
    }

    /// Rebuild a roster from stored participants.
    ///
    /// The caller is responsible for the ordering invariants; see
    /// [`RealmStore::restore`](crate::realm::RealmStore::restore).
    pub(crate) const fn from_parts(participants: Vec<Participant>, last_given_id: u64) -> Self {
        Self {
            participants,
            last_given_id,
        }
    }

    /// Allocate the next id and append a new participant.
    ///
    /// The newcomer starts connected and not yet in the session. Returns a
    /// copy of the stored entry.
    ///
    /// # Errors
    ///
    /// Returns [`IdsExhausted`] if the allocator already stands at
    /// `u64::MAX`. The roster is left unchanged.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        hashed_key: impl Into<String>,
    ) -> Result<Participant, IdsExhausted> {
        let last = ParticipantId(self.last_given_id);
        let id = last.next().ok_or(IdsExhausted(last))?;
        self.last_given_id = id.into_inner();
        let participant = Participant {
            id,
            name: name.into(),
            hashed_key: hashed_key.into(),
            connected: true,
            in_game: false,
            preferences: serde_json::Value::Null,
            joined_at: Utc::now(),
        };
        info!(id = %participant.id, name = %participant.name, "Participant added to roster");

        self.participants.push(participant.clone());
        Ok(participant)
    }

    /// Look up a participant by id.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no participant has that id.
    pub fn find(&self, id: ParticipantId) -> Result<&Participant, NotFound> {
        self.index_of(id)
            .and_then(|index| self.participants.get(index))
            .ok_or(NotFound(id))
    }

    /// Look up a participant by id for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no participant has that id.
    pub fn find_mut(&mut self, id: ParticipantId) -> Result<&mut Participant, NotFound> {
        self.index_of(id)
            .and_then(|index| self.participants.get_mut(index))
            .ok_or(NotFound(id))
    }

    /// Whether a participant with this id exists.
    pub fn contains(&self, id: ParticipantId) -> bool {
        self.index_of(id).is_some()
    }

    /// Find a participant whose name and credential hash both match.
    pub fn authenticate(&self, name: &str, hashed_key: &str) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.name == name && p.hashed_key == hashed_key)
    }

    /// Set the connectivity flag.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no participant has that id.
    pub fn set_connected(
        &mut self,
        id: ParticipantId,
        connected: bool,
    ) -> Result<&Participant, NotFound> {
        let participant = self.find_mut(id)?;
        participant.connected = connected;
        Ok(participant)
    }

    /// Set the in-session flag.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no participant has that id.
    pub fn set_in_game(
        &mut self,
        id: ParticipantId,
        in_game: bool,
    ) -> Result<&Participant, NotFound> {
        let participant = self.find_mut(id)?;
        participant.in_game = in_game;
        Ok(participant)
    }

    /// Participants in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Public projections of every participant, in insertion order.
    pub fn summaries(&self) -> Vec<ParticipantSummary> {
        self.participants.iter().map(Participant::summary).collect()
    }

    /// Number of participants ever added.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether nobody has joined yet.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Last id handed out, `0` before the first join.
    pub const fn last_given_id(&self) -> u64 {
        self.last_given_id
    }

    /// Raw participant slice, for snapshotting.
    pub(crate) fn as_slice(&self) -> &[Participant] {
        &self.participants
    }

    /// Ids are strictly increasing along the vector.
    fn index_of(&self, id: ParticipantId) -> Option<usize> {
        self.participants.binary_search_by_key(&id, |p| p.id).ok()
    }
}
