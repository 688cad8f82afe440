//! Itemforge Domain Layer
//!
//! This crate contains the domain model shared by every other layer:
//! the draft item built from one input row, the typed claim values that
//! go into it, and the trait interfaces behind which the mapping files,
//! the existing-item lookup table, and the remote session live.
//!
//! ## Key Concepts
//!
//! - **DraftItem**: the in-memory, not-yet-uploaded form of one row
//! - **ClaimValue**: a closed sum type - entity reference, text,
//!   quantity, partial-precision date, or a some/no-value marker
//! - **Statement**: a (property, value) assertion with qualifiers and
//!   an optional reference
//! - **Reference**: source metadata, split into test and non-test
//!   groups for duplicate comparison during merge
//!
//! ## Architecture
//!
//! Infrastructure implementations (mapping files, sessions) live in
//! other crates; this crate only defines the types and the trait seams.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod identifier;
pub mod item;
pub mod statement;
pub mod traits;
pub mod value;

// Re-exports for convenience
pub use identifier::{is_entity_id, EntityId, IdentifierError, PropertyId};
pub use item::{DraftItem, LanguageText, Mode};
pub use statement::{Qualifier, Qualifiers, Reference, SourceClaim, Statement};
pub use traits::LookupError;
pub use value::{ClaimValue, DateValue, SpecialValue};
