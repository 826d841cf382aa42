//! Type-safe integer identifier wrappers.
//!
//! Participant ids are allocated by the roster from a monotonic counter,
//! starting at 1. They are never reused within a realm's lifetime, so a
//! [`ParticipantId`] stored in a chat message stays resolvable forever.
//!
//! On the wire an id is a bare JSON integer (`{"user": 1}`), which is why
//! the wrapper is `#[serde(transparent)]`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around `u64` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub u64);

        impl $name {
            /// The first identifier handed out by an allocator.
            pub const FIRST: Self = Self(1);

            /// Return the identifier following this one.
            ///
            /// Returns `None` if the counter would overflow.
            pub const fn next(self) -> Option<Self> {
                match self.0.checked_add(1) {
                    Some(n) => Some(Self(n)),
                    None => None,
                }
            }

            /// Return the inner integer value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a participant in a realm's roster.
    ParticipantId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_is_strictly_increasing() {
        let first = ParticipantId::FIRST;
        let second = first.next();
        assert_eq!(second, Some(ParticipantId(2)));
        assert!(second > Some(first));
    }

    #[test]
    fn next_saturates_to_none() {
        assert_eq!(ParticipantId(u64::MAX).next(), None);
    }

    #[test]
    fn id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&ParticipantId(7)).ok();
        assert_eq!(json.as_deref(), Some("7"));
    }

    #[test]
    fn id_display_matches_integer() {
        assert_eq!(ParticipantId(42).to_string(), "42");
    }
}
