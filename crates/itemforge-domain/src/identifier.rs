//! Identifiers for remote records and properties.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

static ENTITY_ID_PATTERN: OnceLock<Regex> = OnceLock::new();

fn entity_id_pattern() -> &'static Regex {
    ENTITY_ID_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^Q[0-9]+$").expect("entity id pattern is valid")
    })
}

/// Check whether a string is a well-formed entity identifier.
///
/// Strict: the whole string must be `Q` followed by digits, case
/// insensitively. Trailing characters reject, so `"Q1641992sss"` is
/// not an identifier. This is the predicate value coercion dispatches
/// on, which is why it never accepts a bare number.
///
/// # Examples
///
/// ```
/// use itemforge_domain::is_entity_id;
///
/// assert!(is_entity_id("Q1641992"));
/// assert!(!is_entity_id("a string"));
/// assert!(!is_entity_id("Q1641992sss"));
/// ```
pub fn is_entity_id(text: &str) -> bool {
    entity_id_pattern().is_match(text)
}

/// Errors from identifier construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    /// Not `Q` + digits (or bare digits)
    #[error("not a valid entity identifier: {0:?}")]
    InvalidEntityId(String),

    /// Empty property code
    #[error("property identifier must not be empty")]
    EmptyPropertyId,
}

/// Identifier of a record in the remote store, canonically `Q<digits>`.
///
/// Construction is lenient the way lookups in the remote store are:
/// the leading `Q` may be missing or lowercase and is canonicalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    /// Build an entity identifier from a code with or without the
    /// leading `Q`.
    ///
    /// # Examples
    ///
    /// ```
    /// use itemforge_domain::EntityId;
    ///
    /// assert_eq!(EntityId::new("Q42").unwrap().as_str(), "Q42");
    /// assert_eq!(EntityId::new("42").unwrap().as_str(), "Q42");
    /// assert_eq!(EntityId::new("q42").unwrap().as_str(), "Q42");
    /// assert!(EntityId::new("Q42x").is_err());
    /// ```
    pub fn new(code: &str) -> Result<Self, IdentifierError> {
        let trimmed = code.trim();
        let digits = trimmed.strip_prefix(['Q', 'q']).unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdentifierError::InvalidEntityId(code.to_string()));
        }
        Ok(Self(format!("Q{digits}")))
    }

    /// The canonical `Q<digits>` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for EntityId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identifier of a property in the remote store.
///
/// Property codes are opaque to this crate; only emptiness is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(String);

impl PropertyId {
    /// Build a property identifier from its code, e.g. `"P518"`.
    pub fn new(code: &str) -> Result<Self, IdentifierError> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(IdentifierError::EmptyPropertyId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The raw property code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
