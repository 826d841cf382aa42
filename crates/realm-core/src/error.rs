//! Error types for the realm-core crate.
//!
//! Lookup and parse failures surface to the caller of the operation that
//! triggered them and never leave the realm partially mutated.
//! Per-recipient delivery failures are the exception: a broadcast collects
//! them in a [`DeliveryReport`](crate::dispatch::DeliveryReport) instead of
//! failing as a whole.

use realm_bridge::BridgeError;
use realm_types::ParticipantId;

use crate::roster::{IdsExhausted, NotFound};

/// A wire record could not be turned back into a domain value.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A field is missing or has the wrong type.
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The record references a participant the roster does not know.
    #[error("unresolved reference: {0}")]
    Unresolved(#[from] NotFound),
}

/// The transport could not accept a payload for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryFailure {
    /// The recipient has no open outbound channel.
    #[error("recipient is not connected")]
    Disconnected,

    /// The recipient's outbound queue is full.
    #[error("outbound queue full (capacity {capacity})")]
    QueueFull {
        /// Capacity of the recipient's queue.
        capacity: usize,
    },

    /// Any other transport-reported failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Dispatch could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// No delivery callback has been registered.
    #[error("no delivery callback registered")]
    Unconfigured,

    /// A single-recipient notify failed.
    #[error("delivery to participant {participant} failed: {failure}")]
    Delivery {
        /// The intended recipient.
        participant: ParticipantId,
        /// What the transport reported.
        failure: DeliveryFailure,
    },
}

/// Errors returned by [`RealmStore`](crate::realm::RealmStore) operations.
#[derive(Debug, thiserror::Error)]
pub enum RealmError {
    /// An id lookup missed.
    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// The roster cannot allocate another participant id.
    #[error(transparent)]
    IdsExhausted(#[from] IdsExhausted),

    /// A wire record was malformed or unresolvable.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A catalog lookup or record conversion failed.
    #[error("conversion error: {0}")]
    Bridge(#[from] BridgeError),

    /// Dispatch was not configured or a single delivery failed.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A snapshot was written by a different format revision.
    #[error("format version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// The revision this build understands.
        expected: String,
        /// The revision found in the snapshot.
        found: String,
    },

    /// A snapshot violates a roster or chat log invariant.
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
}
