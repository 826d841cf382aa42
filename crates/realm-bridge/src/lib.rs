//! Entity <-> portable record conversion for the Realm.
//!
//! This crate sits between the simulation engine's live entities and the
//! portable records in `realm-types`. It never reaches into a global
//! registry: the caller hands in a [`DefinitionCatalog`] and an
//! `instantiate` closure, which keeps every conversion deterministic and
//! testable with a synthetic catalog.
//!
//! # Modules
//!
//! - [`catalog`] -- Label -> definition index with duplicate rejection.
//! - [`entity`] -- [`ItemEntity`] and [`CharacterEntity`] seams, plus
//!   plain in-memory implementations.
//! - [`item`] -- Item record capture, validation and reconstruction.
//! - [`character`] -- Skill list capture and restoration.
//! - [`error`] -- [`BridgeError`].

pub mod catalog;
pub mod character;
pub mod entity;
pub mod error;
pub mod item;

pub use catalog::{CatalogBuilder, Definition, DefinitionCatalog};
pub use character::{from_character_record, to_character_record, validate_character_record};
pub use entity::{CharacterEntity, GenerationContext, ItemEntity, PlainCharacter, PlainItem};
pub use error::BridgeError;
pub use item::{ResolvedItem, from_item_record, to_item_record, validate_item_record};
