//! Definition catalog: label -> definition lookup.
//!
//! The simulation engine owns the universe of definitions; the realm only
//! needs to turn a label from a portable record back into a definition.
//! Lookups go through maps precomputed once at load time, and a label may
//! appear at most once per namespace. [`CatalogBuilder`] rejects a
//! duplicate outright instead of picking one of the matches.
//!
//! Things and stuffs share the thing namespace. Skills have their own.
//!
//! # File format
//!
//! ```yaml
//! things:
//!   - label: club
//!     quality: true
//!   - label: wood
//!     stuff: true
//! skills:
//!   - label: shooting
//! ```

use std::collections::BTreeMap;

use realm_types::DefinitionKind;
use serde::Deserialize;
use tracing::debug;

use crate::error::BridgeError;

/// A single catalog definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Human-readable label, unique within its namespace.
    pub label: String,
    /// Which namespace the definition belongs to.
    pub kind: DefinitionKind,
    /// Whether instances carry a quality attribute.
    pub quality: bool,
}

impl Definition {
    /// A thing definition without a quality attribute.
    pub fn thing(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: DefinitionKind::Thing,
            quality: false,
        }
    }

    /// A material definition.
    pub fn stuff(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: DefinitionKind::Stuff,
            quality: false,
        }
    }

    /// A skill definition.
    pub fn skill(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: DefinitionKind::Skill,
            quality: false,
        }
    }

    /// Mark instances of this definition as carrying a quality attribute.
    #[must_use]
    pub const fn with_quality(mut self) -> Self {
        self.quality = true;
        self
    }
}

/// Read-only label index over every known definition.
#[derive(Debug, Clone, Default)]
pub struct DefinitionCatalog {
    things: BTreeMap<String, Definition>,
    skills: BTreeMap<String, Definition>,
}

impl DefinitionCatalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Build a catalog from a list of definitions.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::DuplicateLabel`] if two definitions share a
    /// label in the same namespace.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = Definition>,
    ) -> Result<Self, BridgeError> {
        let mut builder = Self::builder();
        for definition in definitions {
            builder.add(definition)?;
        }
        Ok(builder.build())
    }

    /// Parse a catalog from its YAML file form.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::CatalogFormat`] for malformed YAML and
    /// [`BridgeError::DuplicateLabel`] for repeated labels.
    pub fn from_yaml(yaml: &str) -> Result<Self, BridgeError> {
        let file: CatalogFile = serde_yml::from_str(yaml)?;
        let mut builder = Self::builder();
        for entry in file.things {
            let kind = if entry.stuff {
                DefinitionKind::Stuff
            } else {
                DefinitionKind::Thing
            };
            builder.add(Definition {
                label: entry.label,
                kind,
                quality: entry.quality,
            })?;
        }
        for entry in file.skills {
            builder.add(Definition::skill(entry.label))?;
        }
        let catalog = builder.build();
        debug!(
            things = catalog.things.len(),
            skills = catalog.skills.len(),
            "Catalog parsed"
        );
        Ok(catalog)
    }

    /// Resolve an item definition label (thing or stuff).
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotFound`] if no definition has that label.
    pub fn resolve_thing(&self, label: &str) -> Result<&Definition, BridgeError> {
        self.things.get(label).ok_or_else(|| BridgeError::NotFound {
            kind: DefinitionKind::Thing,
            label: label.to_owned(),
        })
    }

    /// Resolve a material label.
    ///
    /// Only definitions marked as stuff qualify; a plain thing with a
    /// matching label is reported as not found.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotFound`] if no material has that label.
    pub fn resolve_stuff(&self, label: &str) -> Result<&Definition, BridgeError> {
        self.things
            .get(label)
            .filter(|def| def.kind == DefinitionKind::Stuff)
            .ok_or_else(|| BridgeError::NotFound {
                kind: DefinitionKind::Stuff,
                label: label.to_owned(),
            })
    }

    /// Resolve a skill label.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NotFound`] if no skill has that label.
    pub fn resolve_skill(&self, label: &str) -> Result<&Definition, BridgeError> {
        self.skills.get(label).ok_or_else(|| BridgeError::NotFound {
            kind: DefinitionKind::Skill,
            label: label.to_owned(),
        })
    }

    /// Number of thing and stuff definitions.
    pub fn thing_count(&self) -> usize {
        self.things.len()
    }

    /// Number of skill definitions.
    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}

/// Accumulates definitions and enforces label uniqueness.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    things: BTreeMap<String, Definition>,
    skills: BTreeMap<String, Definition>,
}

impl CatalogBuilder {
    /// Add one definition.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::DuplicateLabel`] if the label is already
    /// taken in the definition's namespace. The builder is left unchanged.
    pub fn add(&mut self, definition: Definition) -> Result<&mut Self, BridgeError> {
        let namespace = match definition.kind {
            DefinitionKind::Thing | DefinitionKind::Stuff => &mut self.things,
            DefinitionKind::Skill => &mut self.skills,
        };
        if namespace.contains_key(&definition.label) {
            return Err(BridgeError::DuplicateLabel {
                kind: definition.kind,
                label: definition.label,
            });
        }
        namespace.insert(definition.label.clone(), definition);
        Ok(self)
    }

    /// Finish the catalog.
    pub fn build(self) -> DefinitionCatalog {
        DefinitionCatalog {
            things: self.things,
            skills: self.skills,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    things: Vec<ThingEntry>,
    #[serde(default)]
    skills: Vec<SkillEntry>,
}

#[derive(Debug, Deserialize)]
struct ThingEntry {
    label: String,
    #[serde(default)]
    stuff: bool,
    #[serde(default)]
    quality: bool,
}

#[derive(Debug, Deserialize)]
struct SkillEntry {
    label: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn resolves_each_namespace() {
        let catalog = DefinitionCatalog::from_definitions([
            Definition::thing("club").with_quality(),
            Definition::stuff("wood"),
            Definition::skill("melee"),
        ])
        .unwrap();

        assert!(catalog.resolve_thing("club").unwrap().quality);
        assert_eq!(catalog.resolve_stuff("wood").unwrap().kind, DefinitionKind::Stuff);
        assert_eq!(catalog.resolve_skill("melee").unwrap().label, "melee");
        assert_eq!(catalog.thing_count(), 2);
        assert_eq!(catalog.skill_count(), 1);
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let result = DefinitionCatalog::from_definitions([
            Definition::thing("steel"),
            Definition::stuff("steel"),
        ]);
        assert!(matches!(
            result,
            Err(BridgeError::DuplicateLabel { kind: DefinitionKind::Stuff, ref label }) if label == "steel"
        ));
    }

    #[test]
    fn same_label_in_different_namespaces_is_fine() {
        let catalog = DefinitionCatalog::from_definitions([
            Definition::thing("cooking"),
            Definition::skill("cooking"),
        ]);
        assert!(catalog.is_ok());
    }

    #[test]
    fn failed_add_leaves_builder_unchanged() {
        let mut builder = DefinitionCatalog::builder();
        builder.add(Definition::thing("club").with_quality()).unwrap();
        assert!(builder.add(Definition::thing("club")).is_err());
        let catalog = builder.build();
        assert!(catalog.resolve_thing("club").unwrap().quality);
    }

    #[test]
    fn missing_labels_report_namespace() {
        let catalog = DefinitionCatalog::default();
        assert!(matches!(
            catalog.resolve_thing("club"),
            Err(BridgeError::NotFound { kind: DefinitionKind::Thing, .. })
        ));
        assert!(matches!(
            catalog.resolve_skill("melee"),
            Err(BridgeError::NotFound { kind: DefinitionKind::Skill, .. })
        ));
    }

    #[test]
    fn plain_thing_is_not_a_material() {
        let catalog = DefinitionCatalog::from_definitions([Definition::thing("club")]).unwrap();
        assert!(matches!(
            catalog.resolve_stuff("club"),
            Err(BridgeError::NotFound { kind: DefinitionKind::Stuff, .. })
        ));
    }

    #[test]
    fn parses_yaml_catalog() {
        let yaml = r"
things:
  - label: club
    quality: true
  - label: wood
    stuff: true
skills:
  - label: shooting
  - label: cooking
";
        let catalog = DefinitionCatalog::from_yaml(yaml).unwrap();
        assert!(catalog.resolve_thing("club").unwrap().quality);
        assert!(catalog.resolve_stuff("wood").is_ok());
        assert_eq!(catalog.skill_count(), 2);
    }

    #[test]
    fn yaml_duplicates_are_rejected() {
        let yaml = r"
skills:
  - label: shooting
  - label: shooting
";
        assert!(matches!(
            DefinitionCatalog::from_yaml(yaml),
            Err(BridgeError::DuplicateLabel { .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_a_format_error() {
        let yaml = "things: 12";
        assert!(matches!(
            DefinitionCatalog::from_yaml(yaml),
            Err(BridgeError::CatalogFormat { .. })
        ));
    }
}
