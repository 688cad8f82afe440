//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the conversion/upload
//! logic and its infrastructure: mapping files, the existing-item
//! lookup table, and the connected remote session. Implementations
//! live in other crates.

use crate::identifier::{EntityId, PropertyId};
use crate::statement::Statement;
use thiserror::Error;

/// A mapping lookup miss.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    /// No property is mapped under this symbolic name
    #[error("unknown property name: {0:?}")]
    UnknownProperty(String),

    /// No item is mapped under this symbolic name
    #[error("unknown item name: {0:?}")]
    UnknownItem(String),
}

/// Resolves symbolic names from the mapping files to remote identifiers
///
/// Implemented by the infrastructure layer (itemforge-mappings)
pub trait MappingResolver {
    /// Resolve a symbolic property name, e.g. "stated_in".
    fn resolve_property(&self, name: &str) -> Result<PropertyId, LookupError>;

    /// Resolve a symbolic item name, e.g. "sandbox".
    fn resolve_item(&self, name: &str) -> Result<EntityId, LookupError>;
}

/// Lookup table of already-uploaded raw keys
///
/// Read-only for the duration of a run; shared freely across rows.
pub trait ExistingLookup {
    /// The remote record already holding this raw key, if any.
    fn existing_id_for(&self, raw_key: &str) -> Option<EntityId>;
}

/// A connected session against the remote store
///
/// The only capability set the upload path uses. Label-vs-alias
/// precedence for an already-labelled language is the session's
/// concern, not the caller's. `add_claim` is only safe to call on a
/// freshly fetched record, so callers fetch before every claim.
pub trait RepoSession {
    /// Error type for session operations
    type Error;

    /// Create a new empty record and return its session-assigned id.
    fn create_empty_record(&mut self) -> Result<EntityId, Self::Error>;

    /// Re-fetch the record so a following claim write sees fresh state.
    fn fetch_record(&mut self, id: &EntityId) -> Result<(), Self::Error>;

    /// Add a label, or an alias when the language already has a label.
    fn add_label_or_alias(
        &mut self,
        language: &str,
        text: &str,
        target: &EntityId,
    ) -> Result<(), Self::Error>;

    /// Add a description.
    fn add_description(
        &mut self,
        language: &str,
        text: &str,
        target: &EntityId,
    ) -> Result<(), Self::Error>;

    /// Add one statement, with its qualifiers and reference, to a record.
    fn add_claim(&mut self, statement: &Statement, target: &EntityId)
        -> Result<(), Self::Error>;
}
