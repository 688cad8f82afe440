//! The draft item built from one input row, and the run mode.

use crate::identifier::EntityId;
use crate::statement::Statement;

/// A piece of text in a given language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageText {
    /// Language code, e.g. "fi"
    pub language: String,
    /// The text
    pub text: String,
}

impl LanguageText {
    /// Create a language-tagged text.
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self { language: language.into(), text: text.into() }
    }
}

/// The in-memory, not-yet-uploaded representation of one converted row.
///
/// Constructed empty, mutated only through the builder, and treated as
/// immutable once handed to the reconciler. Labels and descriptions may
/// repeat a language code; the remote store resolves label-vs-alias
/// precedence at write time, not this crate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftItem {
    /// Whether this row should be written to the remote store at all
    pub should_upload: bool,
    /// The already-existing record to edit, if known
    pub existing_id: Option<EntityId>,
    /// Labels, in insertion order
    pub labels: Vec<LanguageText>,
    /// Descriptions, in insertion order
    pub descriptions: Vec<LanguageText>,
    /// Statements, in call order; order is significant and preserved
    pub statements: Vec<Statement>,
}

/// Where writes go for the whole run. Set once, never per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Edit real records; create new ones when no existing id is known
    Live,
    /// Redirect every write to one fixed sandbox record
    Sandbox,
}

impl Mode {
    /// Whether this run edits real records.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }
}
