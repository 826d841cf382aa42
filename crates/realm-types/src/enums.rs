//! Enumeration types shared between the realm and its peers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Quality scale
// ---------------------------------------------------------------------------

/// Quality tier of a crafted item.
///
/// Portable item records carry the tier as its integer ordinal
/// (`compQuality`), with `-1` reserved for items that have no quality
/// attribute at all. The ordinals are part of the wire contract and must
/// not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum QualityCategory {
    /// Ordinal 0.
    Awful,
    /// Ordinal 1.
    Poor,
    /// Ordinal 2.
    Normal,
    /// Ordinal 3.
    Good,
    /// Ordinal 4.
    Excellent,
    /// Ordinal 5.
    Masterwork,
    /// Ordinal 6.
    Legendary,
}

impl QualityCategory {
    /// Every tier in ordinal order.
    pub const ALL: [Self; 7] = [
        Self::Awful,
        Self::Poor,
        Self::Normal,
        Self::Good,
        Self::Excellent,
        Self::Masterwork,
        Self::Legendary,
    ];

    /// Return the wire ordinal of this tier.
    pub const fn ordinal(self) -> i32 {
        match self {
            Self::Awful => 0,
            Self::Poor => 1,
            Self::Normal => 2,
            Self::Good => 3,
            Self::Excellent => 4,
            Self::Masterwork => 5,
            Self::Legendary => 6,
        }
    }

    /// Map a wire ordinal back to its tier.
    ///
    /// Returns `None` for anything outside `0..=6`, including the `-1`
    /// "no quality" sentinel.
    pub const fn from_ordinal(ordinal: i32) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Awful),
            1 => Some(Self::Poor),
            2 => Some(Self::Normal),
            3 => Some(Self::Good),
            4 => Some(Self::Excellent),
            5 => Some(Self::Masterwork),
            6 => Some(Self::Legendary),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Definition kinds
// ---------------------------------------------------------------------------

/// The namespace a catalog definition lives in.
///
/// Things and stuffs (materials) share one label namespace, because a
/// material is itself a thing definition. Skills are looked up separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum DefinitionKind {
    /// A placeable or carryable thing (weapons, apparel, resources).
    Thing,
    /// A material a thing can be made from.
    Stuff,
    /// A character skill.
    Skill,
}

impl core::fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Thing => "thing",
            Self::Stuff => "stuff",
            Self::Skill => "skill",
        };
        f.write_str(name)
    }
}
