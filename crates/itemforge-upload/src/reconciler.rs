//! The upload reconciliation state machine.

use crate::config::UploadConfig;
use crate::error::UploadError;
use itemforge_domain::traits::RepoSession;
use itemforge_domain::{DraftItem, EntityId, LanguageText, Mode, PropertyId};
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

/// States of one draft's reconciliation.
///
/// Exactly one targeting decision is made per draft; replay then moves
/// the machine to `Done`. `Skipped` is terminal with no writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileState {
    /// The draft's upload flag was off; nothing was written
    Skipped,
    /// Writes go to the fixed sandbox record
    TargetingSandbox,
    /// Writes go to the draft's known existing record
    TargetingExisting,
    /// Writes go to a freshly created record
    TargetingNew,
    /// Replay finished
    Done,
}

/// One failed write during replay.
///
/// These are collected, not raised: replay is best-effort and a failure
/// never aborts the remaining writes of the row.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WriteFailure {
    /// A label or alias write failed
    #[error("label ({language}): {message}")]
    Label {
        /// Language of the failed label
        language: String,
        /// Session detail
        message: String,
    },

    /// A description write failed
    #[error("description ({language}): {message}")]
    Description {
        /// Language of the failed description
        language: String,
        /// Session detail
        message: String,
    },

    /// A statement write failed (including its pre-write fetch)
    #[error("claim {property}: {message}")]
    Claim {
        /// Property of the failed statement
        property: PropertyId,
        /// Session detail
        message: String,
    },
}

/// Outcome of reconciling one draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    /// The targeting decision that was made
    pub decision: ReconcileState,
    /// Terminal state: `Skipped` or `Done`
    pub state: ReconcileState,
    /// The record written to, when anything was written
    pub target: Option<EntityId>,
    /// Writes that failed during replay
    pub failures: Vec<WriteFailure>,
}

impl UploadReport {
    fn skipped() -> Self {
        Self {
            decision: ReconcileState::Skipped,
            state: ReconcileState::Skipped,
            target: None,
            failures: Vec::new(),
        }
    }

    /// Whether the draft was skipped via its upload flag.
    pub fn is_skipped(&self) -> bool {
        self.state == ReconcileState::Skipped
    }

    /// Whether replay finished with every write accepted.
    pub fn is_clean(&self) -> bool {
        self.state == ReconcileState::Done && self.failures.is_empty()
    }
}

/// Reconciles one draft item with the remote store.
///
/// One instance handles one draft end-to-end; `reconcile` consumes the
/// reconciler. Rows are driven one at a time by the caller, so nothing
/// here synchronizes.
pub struct UploadReconciler<'a, S: RepoSession> {
    session: &'a mut S,
    mode: Mode,
    sandbox_item: EntityId,
}

impl<'a, S> UploadReconciler<'a, S>
where
    S: RepoSession,
    S::Error: fmt::Display,
{
    /// Create a reconciler for one draft.
    pub fn new(session: &'a mut S, mode: Mode, sandbox_item: EntityId) -> Self {
        Self { session, mode, sandbox_item }
    }

    /// Create a reconciler from an upload configuration.
    pub fn from_config(session: &'a mut S, config: &UploadConfig) -> Result<Self, UploadError> {
        let sandbox_item = config.sandbox_id()?;
        Ok(Self::new(session, config.mode(), sandbox_item))
    }

    /// Resolve a target record and replay the draft onto it.
    ///
    /// Replay order is fixed: labels, then descriptions, then
    /// statements. Each statement re-fetches the target before the
    /// claim write. Failed writes land in the report; only record
    /// creation failure aborts the row.
    pub fn reconcile(self, draft: &DraftItem) -> Result<UploadReport, UploadError> {
        if !draft.should_upload {
            info!("skipping draft: upload flag not set");
            return Ok(UploadReport::skipped());
        }

        let (decision, target) = match self.mode {
            Mode::Sandbox => {
                // The sandbox wins even when an existing id is known.
                (ReconcileState::TargetingSandbox, self.sandbox_item.clone())
            }
            Mode::Live => match &draft.existing_id {
                Some(id) => (ReconcileState::TargetingExisting, id.clone()),
                None => {
                    let id = self
                        .session
                        .create_empty_record()
                        .map_err(|e| UploadError::CreateRecord(e.to_string()))?;
                    (ReconcileState::TargetingNew, id)
                }
            },
        };
        info!(target = %target, decision = ?decision, "reconciling draft");

        let mut failures = Vec::new();

        for (language, text) in flatten_by_language(&draft.labels) {
            if let Err(e) = self.session.add_label_or_alias(&language, &text, &target) {
                warn!(%language, error = %e, "label write failed");
                failures.push(WriteFailure::Label { language, message: e.to_string() });
            }
        }

        for (language, text) in flatten_by_language(&draft.descriptions) {
            if let Err(e) = self.session.add_description(&language, &text, &target) {
                warn!(%language, error = %e, "description write failed");
                failures.push(WriteFailure::Description { language, message: e.to_string() });
            }
        }

        for statement in &draft.statements {
            // A claim write is only safe on a freshly fetched record.
            let written = self
                .session
                .fetch_record(&target)
                .and_then(|()| self.session.add_claim(statement, &target));
            if let Err(e) = written {
                warn!(property = %statement.property, error = %e, "claim write failed");
                failures.push(WriteFailure::Claim {
                    property: statement.property.clone(),
                    message: e.to_string(),
                });
            }
        }

        Ok(UploadReport {
            decision,
            state: ReconcileState::Done,
            target: Some(target),
            failures,
        })
    }
}

/// Flatten ordered (language, text) entries into one value per language.
///
/// A later duplicate overwrites the earlier value; first-seen language
/// order is kept. This is a deliberate lossy step: the session takes
/// one candidate per language and handles label-vs-alias precedence
/// against what the record already has.
fn flatten_by_language(entries: &[LanguageText]) -> Vec<(String, String)> {
    let mut flattened: Vec<(String, String)> = Vec::new();
    for entry in entries {
        match flattened.iter_mut().find(|(language, _)| *language == entry.language) {
            Some((language, text)) => {
                warn!(language = %language, "duplicate language entry overwrites earlier value");
                text.clone_from(&entry.text);
            }
            None => flattened.push((entry.language.clone(), entry.text.clone())),
        }
    }
    flattened
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemforge_domain::{ClaimValue, Statement};
    use itemforge_session::{MockSession, SessionCall};

    fn entity(code: &str) -> EntityId {
        EntityId::new(code).unwrap()
    }

    fn statement(property: &str) -> Statement {
        Statement::new(
            PropertyId::new(property).unwrap(),
            ClaimValue::PlainText("value".into()),
        )
    }

    fn uploadable_draft() -> DraftItem {
        DraftItem {
            should_upload: true,
            existing_id: None,
            labels: vec![LanguageText::new("fi", "nimi")],
            descriptions: vec![LanguageText::new("fi", "kuvaus")],
            statements: vec![statement("P31")],
        }
    }

    #[test]
    fn test_upload_flag_off_means_zero_session_calls() {
        let mut session = MockSession::new();
        let reconciler =
            UploadReconciler::new(&mut session, Mode::Live, entity("Q4115189"));
        let report = reconciler.reconcile(&DraftItem::default()).unwrap();

        assert!(report.is_skipped());
        assert_eq!(report.decision, ReconcileState::Skipped);
        assert!(report.target.is_none());
        assert!(session.calls().is_empty());
    }

    #[test]
    fn test_sandbox_mode_targets_sandbox_even_with_existing_id() {
        let mut session = MockSession::new();
        let sandbox = entity("Q4115189");
        let mut draft = uploadable_draft();
        draft.existing_id = Some(entity("Q42"));

        let reconciler = UploadReconciler::new(&mut session, Mode::Sandbox, sandbox.clone());
        let report = reconciler.reconcile(&draft).unwrap();

        assert_eq!(report.decision, ReconcileState::TargetingSandbox);
        assert_eq!(report.state, ReconcileState::Done);
        assert_eq!(report.target, Some(sandbox.clone()));
        assert_eq!(session.records_created(), 0);
        assert_eq!(session.claims_added_to(&sandbox), 1);
    }

    #[test]
    fn test_live_mode_with_existing_id_edits_it_without_creating() {
        let mut session = MockSession::new();
        let mut draft = uploadable_draft();
        draft.existing_id = Some(entity("Q42"));

        let reconciler = UploadReconciler::new(&mut session, Mode::Live, entity("Q4115189"));
        let report = reconciler.reconcile(&draft).unwrap();

        assert_eq!(report.decision, ReconcileState::TargetingExisting);
        assert_eq!(report.target, Some(entity("Q42")));
        assert_eq!(session.records_created(), 0);
    }

    #[test]
    fn test_live_mode_without_existing_id_creates_a_record() {
        let mut session = MockSession::new();
        let draft = uploadable_draft();

        let reconciler = UploadReconciler::new(&mut session, Mode::Live, entity("Q4115189"));
        let report = reconciler.reconcile(&draft).unwrap();

        assert_eq!(report.decision, ReconcileState::TargetingNew);
        assert_eq!(session.records_created(), 1);
        let target = report.target.unwrap();
        assert_eq!(session.claims_added_to(&target), 1);
    }

    #[test]
    fn test_replay_order_is_labels_descriptions_statements() {
        let mut session = MockSession::new();
        let draft = uploadable_draft();

        let reconciler = UploadReconciler::new(&mut session, Mode::Sandbox, entity("Q4115189"));
        reconciler.reconcile(&draft).unwrap();

        let calls = session.calls();
        assert!(matches!(calls[0], SessionCall::AddLabelOrAlias { .. }));
        assert!(matches!(calls[1], SessionCall::AddDescription { .. }));
        // Each claim is preceded by a fresh fetch.
        assert!(matches!(calls[2], SessionCall::FetchRecord(_)));
        assert!(matches!(calls[3], SessionCall::AddClaim { .. }));
    }

    #[test]
    fn test_failed_statement_does_not_stop_the_rest() {
        let mut session = MockSession::new();
        session.fail_property("P17");
        let mut draft = uploadable_draft();
        draft.statements = vec![statement("P31"), statement("P17"), statement("P1082")];

        let reconciler = UploadReconciler::new(&mut session, Mode::Sandbox, entity("Q4115189"));
        let report = reconciler.reconcile(&draft).unwrap();

        assert_eq!(report.state, ReconcileState::Done);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            &report.failures[0],
            WriteFailure::Claim { property, .. } if property.as_str() == "P17"
        ));
        // All three were attempted.
        assert_eq!(session.claims_added_to(&entity("Q4115189")), 3);
    }

    #[test]
    fn test_failed_labels_do_not_abort_the_row() {
        let mut session = MockSession::new();
        session.fail_labels();
        let draft = uploadable_draft();

        let reconciler = UploadReconciler::new(&mut session, Mode::Sandbox, entity("Q4115189"));
        let report = reconciler.reconcile(&draft).unwrap();

        assert_eq!(report.state, ReconcileState::Done);
        assert!(matches!(report.failures[0], WriteFailure::Label { .. }));
        // Descriptions and statements still ran.
        assert_eq!(session.claims_added_to(&entity("Q4115189")), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_duplicate_language_flattens_to_last_value() {
        let entries = vec![
            LanguageText::new("fi", "first"),
            LanguageText::new("sv", "plats"),
            LanguageText::new("fi", "second"),
        ];
        let flattened = flatten_by_language(&entries);
        assert_eq!(
            flattened,
            vec![
                ("fi".to_string(), "second".to_string()),
                ("sv".to_string(), "plats".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_config_checks_the_sandbox_item() {
        let mut session = MockSession::new();
        let config = UploadConfig { sandbox_item: "bogus".into(), ..UploadConfig::default() };
        assert!(UploadReconciler::from_config(&mut session, &config).is_err());
    }
}
