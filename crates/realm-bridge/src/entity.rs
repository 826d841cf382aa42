//! Seams to the simulation engine's live entities.
//!
//! The realm never owns the entity model. It reads and writes live
//! entities only through [`ItemEntity`] and [`CharacterEntity`], and asks
//! the caller for a fresh instance through a plain `instantiate` closure.
//!
//! [`PlainItem`] and [`PlainCharacter`] are minimal in-memory entities for
//! hosts that run a realm without an embedded simulation.

use realm_types::QualityCategory;

use crate::catalog::Definition;

/// Why an entity is being generated.
///
/// Engines may roll different flavour text or art for items that arrive
/// from outside the local session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationContext {
    /// Produced by the local session itself.
    Colony,
    /// Arrived from another participant.
    Outsider,
}

/// A live item stack.
pub trait ItemEntity {
    /// Label of the item's definition.
    fn def_label(&self) -> &str;
    /// Label of the item's material, if it has one.
    fn stuff_label(&self) -> Option<&str>;
    /// Whether the item exposes a quality attribute at all.
    fn has_quality(&self) -> bool;
    /// Current quality, if the item has a quality attribute.
    fn quality(&self) -> Option<QualityCategory>;
    /// Number of items in the stack.
    fn stack_count(&self) -> i32;
    /// Remaining durability.
    fn hit_points(&self) -> i32;
    /// Replace the stack count.
    fn set_stack_count(&mut self, count: i32);
    /// Replace the remaining durability.
    fn set_hit_points(&mut self, hit_points: i32);
    /// Assign a quality. Only called when [`has_quality`](Self::has_quality)
    /// is true.
    fn set_quality(&mut self, quality: QualityCategory, context: GenerationContext);
}

/// A live character with skills.
pub trait CharacterEntity {
    /// Every skill and its level, in the character's own order.
    fn skill_levels(&self) -> Vec<(String, i32)>;
    /// Set the level of one skill.
    fn set_skill_level(&mut self, skill: &Definition, level: i32);
}

// ---------------------------------------------------------------------------
// Plain entities
// ---------------------------------------------------------------------------

/// An item held as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainItem {
    /// Definition label.
    pub def_label: String,
    /// Material label.
    pub stuff_label: Option<String>,
    /// Whether a quality attribute exists.
    pub quality_enabled: bool,
    /// Quality tier, meaningful only when `quality_enabled`.
    pub quality: Option<QualityCategory>,
    /// Stack count.
    pub stack_count: i32,
    /// Remaining durability.
    pub hit_points: i32,
    /// How many times quality has been assigned.
    pub quality_assignments: u32,
}

impl PlainItem {
    /// Instantiate a single fresh item from catalog definitions.
    pub fn instantiate(definition: &Definition, stuff: Option<&Definition>) -> Self {
        Self {
            def_label: definition.label.clone(),
            stuff_label: stuff.map(|s| s.label.clone()),
            quality_enabled: definition.quality,
            quality: None,
            stack_count: 1,
            hit_points: 100,
            quality_assignments: 0,
        }
    }
}

impl ItemEntity for PlainItem {
    fn def_label(&self) -> &str {
        &self.def_label
    }

    fn stuff_label(&self) -> Option<&str> {
        self.stuff_label.as_deref()
    }

    fn has_quality(&self) -> bool {
        self.quality_enabled
    }

    fn quality(&self) -> Option<QualityCategory> {
        if self.quality_enabled {
            self.quality
        } else {
            None
        }
    }

    fn stack_count(&self) -> i32 {
        self.stack_count
    }

    fn hit_points(&self) -> i32 {
        self.hit_points
    }

    fn set_stack_count(&mut self, count: i32) {
        self.stack_count = count;
    }

    fn set_hit_points(&mut self, hit_points: i32) {
        self.hit_points = hit_points;
    }

    fn set_quality(&mut self, quality: QualityCategory, _context: GenerationContext) {
        self.quality = Some(quality);
        self.quality_assignments = self.quality_assignments.saturating_add(1);
    }
}

/// A character held as plain data: an ordered skill list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainCharacter {
    /// Skill label and level pairs, in insertion order.
    pub skills: Vec<(String, i32)>,
}

impl CharacterEntity for PlainCharacter {
    fn skill_levels(&self) -> Vec<(String, i32)> {
        self.skills.clone()
    }

    fn set_skill_level(&mut self, skill: &Definition, level: i32) {
        if let Some(entry) = self.skills.iter_mut().find(|(label, _)| *label == skill.label) {
            entry.1 = level;
        } else {
            self.skills.push((skill.label.clone(), level));
        }
    }
}
