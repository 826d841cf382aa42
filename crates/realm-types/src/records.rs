//! Portable records: plain snapshots that cross the wire.
//!
//! Field names in this module are part of the compatibility contract with
//! existing peers and are spelled exactly as they appear on the wire
//! (`thingDefLabel`, `compQuality`, ...). Optional attributes use sentinel
//! values instead of `null`:
//!
//! - [`NO_QUALITY`] (`-1`) in `compQuality` means "no quality attribute".
//! - [`NO_STUFF`] (`""`) in `stuffDefLabel` means "no material".
//!
//! Every record implements [`WireRecord`], which converts to and from a
//! structured [`serde_json::Value`]. Parsing is strict: a missing or
//! wrongly-typed field is an error, never a silent default.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::enums::QualityCategory;
use crate::ids::ParticipantId;

/// `compQuality` sentinel for items without a quality attribute.
pub const NO_QUALITY: i32 = -1;

/// `stuffDefLabel` sentinel for items without a material.
pub const NO_STUFF: &str = "";

/// Conversion between a record and its structured key-value document.
pub trait WireRecord: Serialize + DeserializeOwned {
    /// Encode the record as a structured document.
    ///
    /// # Errors
    ///
    /// Returns an error only if a field cannot be represented as JSON.
    fn to_raw(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Decode a record from a structured document.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or has the wrong type.
    fn from_raw(raw: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(raw)
    }
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Wire form of a chat message: `{ "user": <id>, "message": <text> }`.
///
/// The author is carried by id only; resolving it requires a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MessageRecord {
    /// Id of the authoring participant.
    pub user: ParticipantId,
    /// Message text.
    pub message: String,
}

impl WireRecord for MessageRecord {}

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

/// One skill and its proficiency level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SkillRecord {
    /// Catalog label of the skill definition.
    pub skill_def_label: String,
    /// Proficiency level.
    pub level: i32,
}

impl WireRecord for SkillRecord {}

/// Portable snapshot of a character: its skills, in the character's order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CharacterRecord {
    /// Skill levels in the order the character reported them.
    pub skills: Vec<SkillRecord>,
}

impl WireRecord for CharacterRecord {}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Portable snapshot of an item stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ItemRecord {
    /// Catalog label of the item's definition.
    pub thing_def_label: String,
    /// Catalog label of the material, or [`NO_STUFF`].
    pub stuff_def_label: String,
    /// Number of items in the stack.
    pub stack_count: i32,
    /// Quality ordinal, or [`NO_QUALITY`].
    pub comp_quality: i32,
    /// Remaining durability.
    pub hit_points: i32,
}

impl ItemRecord {
    /// Return the material label, treating the sentinel as absent.
    pub fn stuff_label(&self) -> Option<&str> {
        if self.stuff_def_label == NO_STUFF {
            None
        } else {
            Some(&self.stuff_def_label)
        }
    }

    /// Whether the record carries a quality value at all.
    pub const fn has_quality(&self) -> bool {
        self.comp_quality != NO_QUALITY
    }

    /// Decode the quality value.
    ///
    /// Returns `Ok(None)` for the sentinel, `Ok(Some(_))` for a valid tier
    /// and `Err(raw)` for anything else.
    pub const fn quality(&self) -> Result<Option<QualityCategory>, i32> {
        if self.comp_quality == NO_QUALITY {
            return Ok(None);
        }
        match QualityCategory::from_ordinal(self.comp_quality) {
            Some(quality) => Ok(Some(quality)),
            None => Err(self.comp_quality),
        }
    }
}

impl WireRecord for ItemRecord {}
