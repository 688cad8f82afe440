//! Itemforge Mappings Layer
//!
//! Infrastructure behind the domain's lookup traits: JSON mapping files
//! resolving symbolic property/item names to remote identifiers, and
//! the lookup table of already-uploaded raw keys built from query
//! result rows.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod existing;
pub mod mapping;

pub use existing::{items_query, sanitize_entity_uri, ExistingItems};
pub use mapping::{Mapping, MappingError, MappingStore};
