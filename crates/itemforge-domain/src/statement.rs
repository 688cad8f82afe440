//! Statements, qualifiers and references.

use crate::identifier::PropertyId;
use crate::value::ClaimValue;

/// A property-value pair narrowing the context of a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Qualifier {
    /// Qualifying property
    pub property: PropertyId,
    /// Qualifying value
    pub value: ClaimValue,
}

impl Qualifier {
    /// Create a qualifier.
    pub fn new(property: PropertyId, value: ClaimValue) -> Self {
        Self { property, value }
    }
}

/// Zero or more qualifiers for one statement.
///
/// Callers pass a single qualifier or a sequence; both normalize here.
///
/// # Examples
///
/// ```
/// use itemforge_domain::{ClaimValue, PropertyId, Qualifier, Qualifiers};
///
/// let qual = Qualifier::new(
///     PropertyId::new("P518").unwrap(),
///     ClaimValue::PlainText("part".into()),
/// );
/// let one: Qualifiers = qual.clone().into();
/// let many: Qualifiers = vec![qual.clone(), qual].into();
/// assert_eq!(one.into_vec().len(), 1);
/// assert_eq!(many.into_vec().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Qualifiers(Vec<Qualifier>);

impl Qualifiers {
    /// No qualifiers.
    pub fn none() -> Self {
        Self::default()
    }

    /// Consume into the underlying sequence.
    pub fn into_vec(self) -> Vec<Qualifier> {
        self.0
    }
}

impl From<Qualifier> for Qualifiers {
    fn from(qualifier: Qualifier) -> Self {
        Self(vec![qualifier])
    }
}

impl From<Vec<Qualifier>> for Qualifiers {
    fn from(qualifiers: Vec<Qualifier>) -> Self {
        Self(qualifiers)
    }
}

impl From<Option<Qualifier>> for Qualifiers {
    fn from(qualifier: Option<Qualifier>) -> Self {
        Self(qualifier.into_iter().collect())
    }
}

/// One source claim inside a reference, e.g. "stated in" or
/// "reference URL".
#[derive(Debug, Clone, PartialEq)]
pub struct SourceClaim {
    /// Source property
    pub property: PropertyId,
    /// Source value
    pub value: ClaimValue,
}

impl SourceClaim {
    /// Create a source claim.
    pub fn new(property: PropertyId, value: ClaimValue) -> Self {
        Self { property, value }
    }
}

/// Supporting-source metadata for a statement.
///
/// Source claims are partitioned by how duplicate detection treats them
/// when merging into an existing record: `test_sources` are compared to
/// decide whether an equivalent reference is already present,
/// `non_test_sources` ride along without being compared. The partition
/// is part of this type's contract, not a storage detail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reference {
    /// Claims compared during duplicate detection
    pub test_sources: Vec<SourceClaim>,
    /// Claims excluded from duplicate detection
    pub non_test_sources: Vec<SourceClaim>,
}

impl Reference {
    /// Create a reference from its two source groups.
    pub fn new(test_sources: Vec<SourceClaim>, non_test_sources: Vec<SourceClaim>) -> Self {
        Self { test_sources, non_test_sources }
    }
}

/// A (property, value) assertion, optionally qualified and referenced.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The asserted property
    pub property: PropertyId,
    /// The asserted value
    pub value: ClaimValue,
    /// Qualifiers, in the order given
    pub qualifiers: Vec<Qualifier>,
    /// Supporting reference, if any
    pub reference: Option<Reference>,
}

impl Statement {
    /// Create a bare statement with no qualifiers or reference.
    pub fn new(property: PropertyId, value: ClaimValue) -> Self {
        Self { property, value, qualifiers: Vec::new(), reference: None }
    }

    /// Attach qualifiers, keeping their order.
    pub fn with_qualifiers(mut self, qualifiers: impl Into<Qualifiers>) -> Self {
        self.qualifiers = qualifiers.into().into_vec();
        self
    }

    /// Attach a reference.
    pub fn with_reference(mut self, reference: Option<Reference>) -> Self {
        self.reference = reference;
        self
    }
}
