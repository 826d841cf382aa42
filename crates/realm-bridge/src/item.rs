//! Item <-> [`ItemRecord`] conversion.
//!
//! The forward direction is a pure projection of the live entity. The
//! reverse direction resolves every label and checks the quality value
//! first, and only then asks the caller to instantiate an entity, so a
//! bad record never produces an observable half-built item.

use realm_types::{ItemRecord, NO_QUALITY, NO_STUFF, QualityCategory};
use tracing::debug;

use crate::catalog::{Definition, DefinitionCatalog};
use crate::entity::{GenerationContext, ItemEntity};
use crate::error::BridgeError;

/// Definitions and decoded values behind a valid item record.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedItem<'c> {
    /// The item's definition.
    pub definition: &'c Definition,
    /// The material definition, if the record names one.
    pub stuff: Option<&'c Definition>,
    /// The decoded quality tier, if the record carries one.
    pub quality: Option<QualityCategory>,
}

/// Snapshot a live item as a portable record.
pub fn to_item_record<E: ItemEntity + ?Sized>(entity: &E) -> ItemRecord {
    let comp_quality = if entity.has_quality() {
        entity.quality().map_or(NO_QUALITY, QualityCategory::ordinal)
    } else {
        NO_QUALITY
    };

    ItemRecord {
        thing_def_label: entity.def_label().to_owned(),
        stuff_def_label: entity.stuff_label().unwrap_or(NO_STUFF).to_owned(),
        stack_count: entity.stack_count(),
        comp_quality,
        hit_points: entity.hit_points(),
    }
}

/// Check a record against the catalog without building anything.
///
/// # Errors
///
/// Returns [`BridgeError::NotFound`] for an unknown item or material
/// label and [`BridgeError::InvalidQuality`] for a quality value that is
/// neither `-1` nor a valid tier.
pub fn validate_item_record<'c>(
    record: &ItemRecord,
    catalog: &'c DefinitionCatalog,
) -> Result<ResolvedItem<'c>, BridgeError> {
    let definition = catalog.resolve_thing(&record.thing_def_label)?;
    let stuff = match record.stuff_label() {
        Some(label) => Some(catalog.resolve_stuff(label)?),
        None => None,
    };
    let quality = record.quality().map_err(BridgeError::InvalidQuality)?;

    Ok(ResolvedItem {
        definition,
        stuff,
        quality,
    })
}

/// Rebuild a live item from a portable record.
///
/// `instantiate` receives the resolved definition and optional material
/// and must return a fresh entity. Stack count and durability are then
/// applied. Quality is applied only when the record carries a tier and
/// the new entity exposes a quality attribute; the `-1` sentinel never
/// reaches [`ItemEntity::set_quality`].
///
/// # Errors
///
/// Fails as [`validate_item_record`] does. `instantiate` is not called
/// on failure.
pub fn from_item_record<E, F>(
    record: &ItemRecord,
    catalog: &DefinitionCatalog,
    instantiate: F,
) -> Result<E, BridgeError>
where
    E: ItemEntity,
    F: FnOnce(&Definition, Option<&Definition>) -> E,
{
    let resolved = validate_item_record(record, catalog)?;

    let mut entity = instantiate(resolved.definition, resolved.stuff);
    entity.set_stack_count(record.stack_count);
    if let Some(quality) = resolved.quality {
        if entity.has_quality() {
            entity.set_quality(quality, GenerationContext::Outsider);
        } else {
            debug!(
                thing = record.thing_def_label,
                quality = record.comp_quality,
                "Dropping quality for item without a quality attribute"
            );
        }
    }
    entity.set_hit_points(record.hit_points);

    Ok(entity)
}
