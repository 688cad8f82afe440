//! Typed claim values.
//!
//! The raw input sniffs types by key presence; once coerced, a value is
//! one of these variants and is never re-inspected downstream.

use crate::identifier::EntityId;

/// A date of year, year-month, or year-month-day precision.
///
/// Precision is implied by which fields are present. A month or day the
/// source did not supply stays `None`; it is never defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateValue {
    /// Calendar year
    pub year: i32,
    /// Month (1-12), if the source had month precision
    pub month: Option<u32>,
    /// Day of month, if the source had day precision
    pub day: Option<u32>,
}

impl DateValue {
    /// A year-precision date.
    pub fn year(year: i32) -> Self {
        Self { year, month: None, day: None }
    }

    /// A month-precision date.
    pub fn year_month(year: i32, month: u32) -> Self {
        Self { year, month: Some(month), day: None }
    }

    /// A day-precision date.
    pub fn full(year: i32, month: u32, day: u32) -> Self {
        Self { year, month: Some(month), day: Some(day) }
    }
}

/// The two special claim markers the remote store understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialValue {
    /// The property has a value, but it is unknown
    SomeValue,
    /// The property is known to have no value
    NoValue,
}

impl SpecialValue {
    /// Parse one of the special keywords, `"somevalue"` or `"novalue"`.
    pub fn from_keyword(text: &str) -> Option<Self> {
        match text {
            "somevalue" => Some(Self::SomeValue),
            "novalue" => Some(Self::NoValue),
            _ => None,
        }
    }

    /// The wire keyword for this marker.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::SomeValue => "somevalue",
            Self::NoValue => "novalue",
        }
    }
}

/// The value of one claim. Exactly one variant, fixed at coercion time.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimValue {
    /// A reference to another record in the store
    EntityRef(EntityId),
    /// Monolingual or plain text, passed through unchanged
    PlainText(String),
    /// A number with an optional unit; no unit means dimensionless
    Quantity {
        /// The numeric amount
        amount: f64,
        /// Unit record, if any
        unit: Option<EntityId>,
    },
    /// A partial-precision date
    Date(DateValue),
    /// An unknown-value or no-value marker
    Special(SpecialValue),
}

impl ClaimValue {
    /// Whether this is a some/no-value marker rather than a concrete value.
    pub fn is_special(&self) -> bool {
        matches!(self, Self::Special(_))
    }
}
