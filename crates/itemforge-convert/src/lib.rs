//! Itemforge Conversion Layer
//!
//! Turns one row of raw structured data into a [`DraftItem`]: raw
//! scalars and key-tagged mappings become typed claim values, statements
//! pick up qualifiers and references, and partial-precision date strings
//! are normalized against a template.
//!
//! # Examples
//!
//! ```
//! use itemforge_convert::dates;
//!
//! let date = dates::normalize("1999-12-09", "%Y-%m-%d").unwrap();
//! assert_eq!((date.year, date.month, date.day), (1999, Some(12), Some(9)));
//!
//! let month_only = dates::normalize("12-1999", "%m-%Y").unwrap();
//! assert_eq!((month_only.year, month_only.month, month_only.day), (1999, Some(12), None));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod coerce;
pub mod dates;
pub mod error;

pub use builder::ItemBuilder;
pub use coerce::coerce;
pub use dates::normalize;
pub use error::ConvertError;

// Re-export the domain types conversions produce.
pub use itemforge_domain::{ClaimValue, DateValue, DraftItem};
