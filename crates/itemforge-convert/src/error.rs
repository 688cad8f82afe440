//! Error types for the conversion layer

use itemforge_domain::{IdentifierError, LookupError};
use thiserror::Error;

/// Errors that can occur while converting raw data
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Date string does not match its template
    #[error("date {text:?} does not match template {template:?}: {source}")]
    Date {
        /// The offending date string
        text: String,
        /// The template it was parsed against
        template: String,
        /// Parser detail
        source: chrono::format::ParseError,
    },

    /// Template never produced a year field
    #[error("template {0:?} has no year token")]
    TemplateWithoutYear(String),

    /// Mapping lookup miss
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Malformed identifier in the raw data
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// `quantity_value` was not a number
    #[error("quantity_value is not a number: {0}")]
    BadQuantity(String),

    /// `unit` was not an identifier string
    #[error("quantity unit is not an identifier string: {0}")]
    BadUnit(String),

    /// `date_value` was not a year/month/day mapping
    #[error("date_value is not a date mapping: {0}")]
    BadDateValue(String),
}
