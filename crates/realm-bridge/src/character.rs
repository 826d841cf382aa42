//! Character <-> [`CharacterRecord`] conversion.
//!
//! A character travels as its ordered skill list. Capture copies every
//! skill level the entity reports; restore resolves every skill label
//! against the catalog before instantiating, then applies each level in
//! record order.

use realm_types::{CharacterRecord, SkillRecord};

use crate::catalog::{Definition, DefinitionCatalog};
use crate::entity::CharacterEntity;
use crate::error::BridgeError;

/// Snapshot a live character as a portable record.
pub fn to_character_record<E: CharacterEntity + ?Sized>(entity: &E) -> CharacterRecord {
    CharacterRecord {
        skills: entity
            .skill_levels()
            .into_iter()
            .map(|(skill_def_label, level)| SkillRecord {
                skill_def_label,
                level,
            })
            .collect(),
    }
}

/// Resolve every skill label in a record.
///
/// Returns the resolved definitions paired with their levels, in record
/// order.
///
/// # Errors
///
/// Returns [`BridgeError::NotFound`] for the first unknown skill label.
pub fn validate_character_record<'c>(
    record: &CharacterRecord,
    catalog: &'c DefinitionCatalog,
) -> Result<Vec<(&'c Definition, i32)>, BridgeError> {
    record
        .skills
        .iter()
        .map(|skill| -> Result<_, BridgeError> {
            Ok((catalog.resolve_skill(&skill.skill_def_label)?, skill.level))
        })
        .collect()
}

/// Rebuild a live character from a portable record.
///
/// `instantiate` must return a fresh character; every skill in the record
/// is then applied to it.
///
/// # Errors
///
/// Fails as [`validate_character_record`] does. `instantiate` is not
/// called on failure.
pub fn from_character_record<E, F>(
    record: &CharacterRecord,
    catalog: &DefinitionCatalog,
    instantiate: F,
) -> Result<E, BridgeError>
where
    E: CharacterEntity,
    F: FnOnce() -> E,
{
    let skills = validate_character_record(record, catalog)?;

    let mut entity = instantiate();
    for (definition, level) in skills {
        entity.set_skill_level(definition, level);
    }

    Ok(entity)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::entity::PlainCharacter;

    fn catalog() -> DefinitionCatalog {
        DefinitionCatalog::from_definitions([
            Definition::skill("shooting"),
            Definition::skill("cooking"),
            Definition::skill("mining"),
        ])
        .unwrap()
    }

    fn veteran() -> PlainCharacter {
        PlainCharacter {
            skills: vec![
                (String::from("shooting"), 12),
                (String::from("cooking"), 3),
            ],
        }
    }

    #[test]
    fn captures_every_skill_in_order() {
        let record = to_character_record(&veteran());
        assert_eq!(record.skills.len(), 2);
        assert_eq!(record.skills[0].skill_def_label, "shooting");
        assert_eq!(record.skills[0].level, 12);
        assert_eq!(record.skills[1].skill_def_label, "cooking");
        assert_eq!(record.skills[1].level, 3);
    }

    #[test]
    fn restores_skills_from_record() {
        let catalog = catalog();
        let record = to_character_record(&veteran());
        let restored: PlainCharacter =
            from_character_record(&record, &catalog, PlainCharacter::default).unwrap();
        assert_eq!(restored, veteran());
    }

    #[test]
    fn restore_overwrites_existing_levels() {
        let catalog = catalog();
        let record = CharacterRecord {
            skills: vec![SkillRecord {
                skill_def_label: String::from("mining"),
                level: 8,
            }],
        };
        let restored: PlainCharacter = from_character_record(&record, &catalog, || {
            PlainCharacter {
                skills: vec![(String::from("mining"), 1)],
            }
        })
        .unwrap();
        assert_eq!(restored.skills, vec![(String::from("mining"), 8)]);
    }

    #[test]
    fn empty_record_yields_fresh_character() {
        let catalog = catalog();
        let restored: PlainCharacter =
            from_character_record(&CharacterRecord::default(), &catalog, PlainCharacter::default)
                .unwrap();
        assert!(restored.skills.is_empty());
    }

    #[test]
    fn unknown_skill_fails_without_instantiating() {
        let catalog = catalog();
        let record = CharacterRecord {
            skills: vec![
                SkillRecord {
                    skill_def_label: String::from("shooting"),
                    level: 5,
                },
                SkillRecord {
                    skill_def_label: String::from("juggling"),
                    level: 2,
                },
            ],
        };
        let calls = Cell::new(0_u32);
        let result: Result<PlainCharacter, _> = from_character_record(&record, &catalog, || {
            calls.set(calls.get().saturating_add(1));
            PlainCharacter::default()
        });
        assert!(matches!(
            result,
            Err(BridgeError::NotFound { ref label, .. }) if label == "juggling"
        ));
        assert_eq!(calls.get(), 0);
    }
}
