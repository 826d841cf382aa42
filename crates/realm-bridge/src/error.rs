//! Error types for the realm-bridge crate.
//!
//! Every conversion that can fail returns a [`BridgeError`] before any
//! entity has been instantiated, so a failed reconstruction never leaves
//! a half-built entity behind.

use realm_types::DefinitionKind;

/// Errors that can occur while building a catalog or converting records.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// No definition with the given label exists in the catalog.
    #[error("no {kind} definition labelled {label:?}")]
    NotFound {
        /// The namespace that was searched.
        kind: DefinitionKind,
        /// The label that did not resolve.
        label: String,
    },

    /// Two definitions in the same namespace share a label.
    #[error("duplicate {kind} definition label {label:?}")]
    DuplicateLabel {
        /// The namespace containing the clash.
        kind: DefinitionKind,
        /// The repeated label.
        label: String,
    },

    /// A quality value is neither the `-1` sentinel nor a valid tier.
    #[error("invalid quality ordinal {0}")]
    InvalidQuality(i32),

    /// A catalog file could not be parsed.
    #[error("failed to parse catalog: {source}")]
    CatalogFormat {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },
}
