//! Itemforge Session Layer
//!
//! Implementations of the `RepoSession` trait from `itemforge-domain`,
//! plus the per-run cache that hands out one session per (language,
//! family) pair.
//!
//! # Sessions
//!
//! - `MockSession`: deterministic in-memory session for testing; records
//!   every call and can inject per-property write failures
//!
//! A session speaking the real wiki API plugs in behind the same trait;
//! nothing in the conversion or upload layers changes for it.
//!
//! # Examples
//!
//! ```
//! use itemforge_session::MockSession;
//! use itemforge_domain::traits::RepoSession;
//!
//! let mut session = MockSession::new();
//! let first = session.create_empty_record().unwrap();
//! let second = session.create_empty_record().unwrap();
//! assert_ne!(first, second);
//! assert_eq!(session.calls().len(), 2);
//! ```

#![warn(missing_docs)]

pub mod cache;

use itemforge_domain::traits::RepoSession;
use itemforge_domain::{EntityId, PropertyId, Statement};
use std::collections::HashSet;
use thiserror::Error;

pub use cache::SessionCache;

/// Errors from session operations
#[derive(Debug, Error)]
pub enum SessionError {
    /// The remote side rejected a write
    #[error("write rejected: {0}")]
    WriteRejected(String),

    /// Record creation failed
    #[error("record creation failed: {0}")]
    CreateFailed(String),
}

/// One recorded session call, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCall {
    /// `create_empty_record` was called
    CreateEmptyRecord,
    /// `fetch_record` was called for this id
    FetchRecord(EntityId),
    /// A label or alias write
    AddLabelOrAlias {
        /// Language code
        language: String,
        /// Label text
        text: String,
        /// Record written to
        target: EntityId,
    },
    /// A description write
    AddDescription {
        /// Language code
        language: String,
        /// Description text
        text: String,
        /// Record written to
        target: EntityId,
    },
    /// A claim write
    AddClaim {
        /// Property of the claim
        property: PropertyId,
        /// Record written to
        target: EntityId,
    },
}

/// Deterministic in-memory session for testing.
///
/// Records every call, mints sequential ids for created records, and
/// can be told to reject writes for specific properties or for all
/// labels, which is how the best-effort replay paths get exercised.
#[derive(Debug, Default)]
pub struct MockSession {
    calls: Vec<SessionCall>,
    next_record: u64,
    failing_properties: HashSet<String>,
    fail_labels: bool,
    fail_fetches: bool,
}

impl MockSession {
    /// A fresh session with no scripted failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject future `add_claim` calls for this property code.
    pub fn fail_property(&mut self, code: &str) {
        self.failing_properties.insert(code.to_string());
    }

    /// Reject all future label writes.
    pub fn fail_labels(&mut self) {
        self.fail_labels = true;
    }

    /// Reject all future record fetches.
    pub fn fail_fetches(&mut self) {
        self.fail_fetches = true;
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> &[SessionCall] {
        &self.calls
    }

    /// How many claims were written to `target`.
    pub fn claims_added_to(&self, target: &EntityId) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SessionCall::AddClaim { target: t, .. } if t == target))
            .count()
    }

    /// How many records were created.
    pub fn records_created(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SessionCall::CreateEmptyRecord))
            .count()
    }
}

impl RepoSession for MockSession {
    type Error = SessionError;

    fn create_empty_record(&mut self) -> Result<EntityId, Self::Error> {
        self.calls.push(SessionCall::CreateEmptyRecord);
        self.next_record += 1;
        let id = EntityId::new(&format!("Q{}", 90_000_000 + self.next_record))
            .map_err(|e| SessionError::CreateFailed(e.to_string()))?;
        Ok(id)
    }

    fn fetch_record(&mut self, id: &EntityId) -> Result<(), Self::Error> {
        self.calls.push(SessionCall::FetchRecord(id.clone()));
        if self.fail_fetches {
            return Err(SessionError::WriteRejected(format!("cannot fetch {id}")));
        }
        Ok(())
    }

    fn add_label_or_alias(
        &mut self,
        language: &str,
        text: &str,
        target: &EntityId,
    ) -> Result<(), Self::Error> {
        self.calls.push(SessionCall::AddLabelOrAlias {
            language: language.to_string(),
            text: text.to_string(),
            target: target.clone(),
        });
        if self.fail_labels {
            return Err(SessionError::WriteRejected(format!("label in {language}")));
        }
        Ok(())
    }

    fn add_description(
        &mut self,
        language: &str,
        text: &str,
        target: &EntityId,
    ) -> Result<(), Self::Error> {
        self.calls.push(SessionCall::AddDescription {
            language: language.to_string(),
            text: text.to_string(),
            target: target.clone(),
        });
        Ok(())
    }

    fn add_claim(&mut self, statement: &Statement, target: &EntityId) -> Result<(), Self::Error> {
        self.calls.push(SessionCall::AddClaim {
            property: statement.property.clone(),
            target: target.clone(),
        });
        if self.failing_properties.contains(statement.property.as_str()) {
            return Err(SessionError::WriteRejected(format!(
                "claim {} on {target}",
                statement.property
            )));
        }
        Ok(())
    }
}
