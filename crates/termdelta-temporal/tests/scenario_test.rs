//! Worked scenarios: each one has a single known answer.

use termdelta_core::config::EngineConfig;
use termdelta_core::models::{EffectiveTime, TransitionPredicate};
use termdelta_temporal::resolve::{resolve_attribute, LabelResolver, ResolveStats};
use termdelta_temporal::{build_timelines, AttributeSpec, RelationIndex, TransitionDetector};
use test_fixtures::scenarios;
use test_fixtures::{t, FSN_FIELD, VALUE_FIELD};

fn reason_at(rows: Vec<termdelta_core::models::RawRow>, at: EffectiveTime) -> (String, String, bool) {
    let (reasons, _) = RelationIndex::from_rows("reasons", rows);
    let (labels, _) = RelationIndex::from_rows("fsn", vec![]);
    let spec = AttributeSpec::new("inactivation_reason", "reasons", VALUE_FIELD);
    let attr = resolve_attribute(
        &spec,
        &reasons,
        LabelResolver::new(&labels, FSN_FIELD),
        "E1",
        at,
        &EngineConfig::default(),
        &mut ResolveStats::default(),
    );
    (attr.value, attr.label, attr.defaulted)
}

// ═══════════════════════════════════════════════════════════════════════════
// A: one flip, one event
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn a_active_then_inactive_yields_one_event() {
    let (timelines, _) = build_timelines("concepts", scenarios::simple_inactivation());
    let events = TransitionDetector::new(TransitionPredicate::first_inactivation())
        .detect_all(&timelines, false);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].entity_id.as_str(), "E1");
    assert_eq!(events[0].event_time, t(20210101));
}

// ═══════════════════════════════════════════════════════════════════════════
// B, C: as-of lookups
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn b_later_row_is_ignored() {
    let (value, _, defaulted) = reason_at(scenarios::reason_history(), t(20210101));
    assert_eq!(value, "R1");
    assert!(!defaulted);
}

#[test]
fn c_inactive_row_gives_sentinel() {
    let (value, label, defaulted) = reason_at(scenarios::inactive_reason_only(), t(20210101));
    assert_eq!(value, "0");
    assert_eq!(label, "Not specified");
    assert!(defaulted);
}

// ═══════════════════════════════════════════════════════════════════════════
// D: duplicate timestamp
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn d_last_seen_row_wins_the_tie() {
    let (timelines, diagnostics) = build_timelines("fsn", scenarios::duplicate_timestamp());
    let timeline = timelines.get(&"E2".into()).unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline.first().field(FSN_FIELD), Some("second"));
    assert_eq!(diagnostics.duplicates_superseded, 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// E: single active row
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn e_single_row_is_a_creation_not_an_inactivation() {
    let (timelines, _) = build_timelines("concepts", scenarios::single_active());
    let inactivations = TransitionDetector::new(TransitionPredicate::first_inactivation())
        .detect_all(&timelines, false);
    assert!(inactivations.is_empty());

    let creations = TransitionDetector::new(TransitionPredicate::first_activation())
        .detect_all(&timelines, false);
    assert_eq!(creations.len(), 1);
    assert_eq!(creations[0].event_time, t(20230101));
}
