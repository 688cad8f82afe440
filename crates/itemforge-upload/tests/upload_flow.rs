//! Integration tests for the full row-to-record pipeline
//!
//! These tests build a draft through the conversion layer against real
//! mapping tables, then reconcile it through a recording session.

use itemforge_convert::ItemBuilder;
use itemforge_domain::traits::{ExistingLookup, MappingResolver};
use itemforge_domain::{ClaimValue, EntityId, Mode, Qualifiers};
use itemforge_mappings::{ExistingItems, Mapping, MappingStore};
use itemforge_session::{MockSession, SessionCall};
use itemforge_upload::{ReconcileState, UploadReconciler};
use serde_json::json;
use std::collections::HashMap;

fn mapping_store() -> MappingStore {
    let properties = Mapping::from_table(HashMap::from([
        ("stated_in".to_string(), "P248".to_string()),
        ("publication_date".to_string(), "P577".to_string()),
        ("reference_url".to_string(), "P854".to_string()),
        ("retrieved".to_string(), "P813".to_string()),
        ("applies_to_part".to_string(), "P518".to_string()),
        ("instance_of".to_string(), "P31".to_string()),
        ("area".to_string(), "P2046".to_string()),
        ("inception".to_string(), "P571".to_string()),
    ]));
    let items = Mapping::from_table(HashMap::from([
        ("sandbox".to_string(), "Q4115189".to_string()),
        ("nature_reserve".to_string(), "Q179049".to_string()),
    ]));
    MappingStore::new(properties, items)
}

#[test]
fn test_row_to_new_live_record() {
    let store = mapping_store();
    let mut builder = ItemBuilder::new(&store);

    builder.add_label("fi", "Esimerkkialue");
    builder.add_label("sv", "Exempelområde");
    builder.add_description("en", "nature reserve in Finland");

    let reference = builder
        .build_reference("Q5412157", None, Some("http://example.org/areas/7"), Some("2017-03-14"))
        .unwrap();
    let instance_of = store.resolve_item("nature_reserve").unwrap();
    builder
        .add_statement(
            "instance_of",
            &json!(instance_of.as_str()),
            Qualifiers::none(),
            Some(reference),
        )
        .unwrap();
    builder
        .add_statement(
            "area",
            &json!({"quantity_value": 12.5, "unit": "Q712226"}),
            Qualifiers::none(),
            None,
        )
        .unwrap();
    builder
        .add_statement(
            "inception",
            &json!({"date_value": {"year": 1998, "month": 6}}),
            Qualifiers::none(),
            None,
        )
        .unwrap();
    builder.set_upload(true);

    let draft = builder.finish();
    let mut session = MockSession::new();
    let sandbox = store.resolve_item("sandbox").unwrap();
    let report = UploadReconciler::new(&mut session, Mode::Live, sandbox)
        .reconcile(&draft)
        .unwrap();

    assert_eq!(report.decision, ReconcileState::TargetingNew);
    assert_eq!(report.state, ReconcileState::Done);
    assert!(report.is_clean());

    let target = report.target.unwrap();
    assert_eq!(session.records_created(), 1);
    assert_eq!(session.claims_added_to(&target), 3);

    // Labels went in before any claim, one per language.
    let label_count = session
        .calls()
        .iter()
        .take_while(|call| !matches!(call, SessionCall::FetchRecord(_)))
        .filter(|call| matches!(call, SessionCall::AddLabelOrAlias { .. }))
        .count();
    assert_eq!(label_count, 2);
}

#[test]
fn test_row_matched_through_existing_lookup_edits_in_place() {
    let store = mapping_store();
    let existing = ExistingItems::from_rows(vec![(
        "http://www.wikidata.org/entity/Q28936211".to_string(),
        "4420".to_string(),
    )]);

    let mut builder = ItemBuilder::new(&store);
    builder.add_label("fi", "Vanha alue");
    builder.associate_existing(existing.existing_id_for("4420"));
    builder.set_upload(true);
    let draft = builder.finish();

    let mut session = MockSession::new();
    let report = UploadReconciler::new(
        &mut session,
        Mode::Live,
        EntityId::new("Q4115189").unwrap(),
    )
    .reconcile(&draft)
    .unwrap();

    assert_eq!(report.decision, ReconcileState::TargetingExisting);
    assert_eq!(report.target, Some(EntityId::new("Q28936211").unwrap()));
    assert_eq!(session.records_created(), 0);
}

#[test]
fn test_unmatched_raw_key_leaves_draft_unassociated() {
    let store = mapping_store();
    let existing = ExistingItems::from_rows(Vec::new());

    let mut builder = ItemBuilder::new(&store);
    builder.associate_existing(existing.existing_id_for("4420"));
    builder.set_upload(true);
    let draft = builder.finish();
    assert!(draft.existing_id.is_none());

    // No existing id in live mode means a fresh record.
    let mut session = MockSession::new();
    let report = UploadReconciler::new(
        &mut session,
        Mode::Live,
        EntityId::new("Q4115189").unwrap(),
    )
    .reconcile(&draft)
    .unwrap();
    assert_eq!(report.decision, ReconcileState::TargetingNew);
}

#[test]
fn test_sandbox_run_funnels_every_row_to_the_sandbox() {
    let store = mapping_store();
    let sandbox = store.resolve_item("sandbox").unwrap();
    let mut session = MockSession::new();

    for raw_key in ["100", "200"] {
        let mut builder = ItemBuilder::new(&store);
        builder.add_label("fi", raw_key);
        builder.associate_existing(Some(EntityId::new("Q42").unwrap()));
        builder.set_upload(true);
        let draft = builder.finish();

        let report = UploadReconciler::new(&mut session, Mode::Sandbox, sandbox.clone())
            .reconcile(&draft)
            .unwrap();
        assert_eq!(report.target, Some(sandbox.clone()));
    }

    assert_eq!(session.records_created(), 0);
}

#[test]
fn test_skipped_and_failing_rows_do_not_stop_a_batch() {
    let store = mapping_store();
    let mut session = MockSession::new();
    session.fail_property("P31");
    let sandbox = store.resolve_item("sandbox").unwrap();

    // Row 1: skipped by its flag.
    let skipped = ItemBuilder::new(&store).finish();
    let report = UploadReconciler::new(&mut session, Mode::Sandbox, sandbox.clone())
        .reconcile(&skipped)
        .unwrap();
    assert!(report.is_skipped());
    assert!(session.calls().is_empty());

    // Row 2: one statement fails, the other lands.
    let mut builder = ItemBuilder::new(&store);
    builder.set_upload(true);
    builder
        .add_statement("instance_of", &json!("Q179049"), Qualifiers::none(), None)
        .unwrap();
    builder
        .add_statement("area", &json!({"quantity_value": 3}), Qualifiers::none(), None)
        .unwrap();
    let draft = builder.finish();

    let report = UploadReconciler::new(&mut session, Mode::Sandbox, sandbox.clone())
        .reconcile(&draft)
        .unwrap();
    assert_eq!(report.failures.len(), 1);
    assert_eq!(session.claims_added_to(&sandbox), 2);

    // Row 3: a following row still uploads normally.
    let mut builder = ItemBuilder::new(&store);
    builder.set_upload(true);
    builder
        .add_statement("area", &json!({"quantity_value": 9}), Qualifiers::none(), None)
        .unwrap();
    let report = UploadReconciler::new(&mut session, Mode::Sandbox, sandbox.clone())
        .reconcile(&builder.finish())
        .unwrap();
    assert!(report.is_clean());
}

#[test]
fn test_qualified_statement_survives_the_round_trip() {
    let store = mapping_store();
    let mut builder = ItemBuilder::new(&store);
    builder.set_upload(true);
    let qualifier = builder.qualifier_applies_to("Q1075").unwrap();
    builder
        .add_statement("instance_of", &json!("novalue"), qualifier, None)
        .unwrap();
    let draft = builder.finish();

    assert!(draft.statements[0].value.is_special());
    assert_eq!(draft.statements[0].qualifiers.len(), 1);
    assert_eq!(
        draft.statements[0].qualifiers[0].value,
        ClaimValue::EntityRef(EntityId::new("Q1075").unwrap())
    );

    let mut session = MockSession::new();
    let report = UploadReconciler::new(
        &mut session,
        Mode::Sandbox,
        EntityId::new("Q4115189").unwrap(),
    )
    .reconcile(&draft)
    .unwrap();
    assert!(report.is_clean());
}
