//! Append-only chat log.
//!
//! A [`ChatMessage`] references its author by [`ParticipantId`], which is
//! a stable key into the append-only [`Roster`]. Messages are immutable
//! once logged and the log offers no removal or edit.

use realm_types::{MessageRecord, ParticipantId, WireRecord};
use serde_json::Value;

use crate::error::ParseError;
use crate::roster::Roster;

/// A posted chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Author, resolvable against the roster the message was posted in.
    pub user: ParticipantId,
    /// Message text.
    pub message: String,
}

impl ChatMessage {
    /// Project onto the wire record.
    pub fn to_record(&self) -> MessageRecord {
        MessageRecord {
            user: self.user,
            message: self.message.clone(),
        }
    }

    /// Encode as `{ "user": <id>, "message": <text> }`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the record cannot be represented as JSON.
    pub fn to_raw(&self) -> Result<Value, serde_json::Error> {
        self.to_record().to_raw()
    }

    /// Decode a message and resolve its author against `roster`.
    ///
    /// Nothing is constructed unless the whole record parses and the
    /// author resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Malformed`] for a missing or wrongly-typed
    /// field and [`ParseError::Unresolved`] if the author id is not in the
    /// roster.
    pub fn from_raw(roster: &Roster, raw: &Value) -> Result<Self, ParseError> {
        let record = MessageRecord::from_raw(raw)?;
        Self::from_record(roster, record)
    }

    /// Resolve a parsed record against `roster`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Unresolved`] if the author id is not in the
    /// roster.
    pub fn from_record(roster: &Roster, record: MessageRecord) -> Result<Self, ParseError> {
        let author = roster.find(record.user)?;
        Ok(Self {
            user: author.id,
            message: record.message,
        })
    }
}

/// Messages in posting order.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Append a message.
    pub(crate) fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Messages oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    /// Wire records oldest first.
    pub fn records(&self) -> Vec<MessageRecord> {
        self.messages.iter().map(ChatMessage::to_record).collect()
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Number of messages logged.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether nothing has been posted yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
