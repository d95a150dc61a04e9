//! Property tests for timelines, detection and as-of resolution.

use proptest::prelude::*;

use termdelta_core::config::EngineConfig;
use termdelta_core::models::{EffectiveTime, RawRow, TransitionPredicate};
use termdelta_temporal::resolve::{resolve_attribute, LabelResolver, ResolveStats};
use termdelta_temporal::{build_timelines, AttributeSpec, RelationIndex, TransitionDetector};
use test_fixtures::{attribute, entity, t, VALUE_FIELD};

// ─── Strategies ──────────────────────────────────────────────────────────

fn date() -> impl Strategy<Value = u32> {
    (1990u32..2030, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| y * 10_000 + m * 100 + d)
}

/// One entity's history with distinct times, in ascending time order.
fn history() -> impl Strategy<Value = Vec<(u32, bool)>> {
    prop::collection::btree_map(date(), any::<bool>(), 1..24)
        .prop_map(|m| m.into_iter().collect())
}

fn reason_rows(history: &[(u32, bool)]) -> Vec<RawRow> {
    history
        .iter()
        .enumerate()
        .map(|(i, &(time, active))| attribute("E1", &format!("m{i}"), time, active, &format!("V{i}")))
        .collect()
}

fn states(rows: &[RawRow]) -> Vec<(u32, bool)> {
    let (timelines, _) = build_timelines("concepts", rows.to_vec());
    timelines
        .get(&"E1".into())
        .map(|tl| tl.rows().iter().map(|r| (r.effective_time.value(), r.active)).collect())
        .unwrap_or_default()
}

// ═══════════════════════════════════════════════════════════════════════════
// Timeline ordering
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_shuffled_input_builds_same_timeline(
        (sorted, shuffled) in history().prop_flat_map(|h| (Just(h.clone()), Just(h).prop_shuffle()))
    ) {
        let rows = |h: &[(u32, bool)]| -> Vec<RawRow> {
            h.iter().map(|&(time, active)| entity("E1", time, active)).collect()
        };
        let from_sorted = states(&rows(&sorted));
        let from_shuffled = states(&rows(&shuffled));
        prop_assert_eq!(&from_sorted, &sorted);
        prop_assert_eq!(from_sorted, from_shuffled);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Detection
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_detection_is_idempotent(h in history()) {
        let rows: Vec<RawRow> = h.iter().map(|&(time, active)| entity("E1", time, active)).collect();
        let (timelines, _) = build_timelines("concepts", rows);
        let timeline = timelines.get(&"E1".into()).unwrap();
        for predicate in [TransitionPredicate::first_inactivation(), TransitionPredicate::first_activation()] {
            let detector = TransitionDetector::new(predicate);
            prop_assert_eq!(detector.detect(timeline), detector.detect(timeline));
        }
    }

    #[test]
    fn prop_first_inactivation_follows_an_active_row(h in history()) {
        let rows: Vec<RawRow> = h.iter().map(|&(time, active)| entity("E1", time, active)).collect();
        let (timelines, _) = build_timelines("concepts", rows);
        let event = TransitionDetector::new(TransitionPredicate::first_inactivation())
            .detect(timelines.get(&"E1".into()).unwrap());
        let expected = h.windows(2).find(|w| w[0].1 && !w[1].1).map(|w| w[1].0);
        prop_assert_eq!(event.map(|e| e.event_time.value()), expected);
    }

    #[test]
    fn prop_parallel_detection_matches_sequential(
        histories in prop::collection::vec(history(), 1..12)
    ) {
        let rows: Vec<RawRow> = histories
            .iter()
            .enumerate()
            .flat_map(|(n, h)| h.iter().map(move |&(time, active)| entity(&n.to_string(), time, active)))
            .collect();
        let (timelines, _) = build_timelines("concepts", rows);
        let detector = TransitionDetector::new(TransitionPredicate::first_inactivation());
        prop_assert_eq!(detector.detect_all(&timelines, true), detector.detect_all(&timelines, false));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// As-of resolution
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_resolution_never_looks_ahead(h in history(), probe in date()) {
        let (index, _) = RelationIndex::from_rows("reasons", reason_rows(&h));
        let at = t(probe);
        if let Some(row) = index.resolve("E1", at) {
            prop_assert!(row.effective_time <= at);
            prop_assert!(row.active);
        }
        for row in index.active_until("E1", at) {
            prop_assert!(row.effective_time <= at);
        }
    }

    #[test]
    fn prop_nothing_applicable_means_exact_sentinel(h in history(), probe in date()) {
        let (index, _) = RelationIndex::from_rows("reasons", reason_rows(&h));
        let (labels, _) = RelationIndex::from_rows("fsn", vec![]);
        let config = EngineConfig::default();
        let spec = AttributeSpec::new("reason", "reasons", VALUE_FIELD);
        let attr = resolve_attribute(
            &spec,
            &index,
            LabelResolver::new(&labels, "term"),
            "E1",
            t(probe),
            &config,
            &mut ResolveStats::default(),
        );
        let applicable = h.iter().any(|&(time, active)| active && time <= probe);
        prop_assert_eq!(attr.defaulted, !applicable);
        if !applicable {
            prop_assert_eq!(attr.value, config.default_attribute_value);
            prop_assert_eq!(attr.label, config.default_attribute_label);
            prop_assert_eq!(attr.source_time, None);
        }
    }

    #[test]
    fn prop_later_reference_never_resolves_earlier(h in history(), a in date(), b in date()) {
        let (index, _) = RelationIndex::from_rows("reasons", reason_rows(&h));
        let (t1, t2) = if a <= b { (t(a), t(b)) } else { (t(b), t(a)) };
        let early = index.resolve("E1", t1).map(|r| r.effective_time);
        let late = index.resolve("E1", t2).map(|r| r.effective_time);
        if let Some(early) = early {
            prop_assert!(late.is_some_and(|late| late >= early));
        }
        prop_assert!(index.resolve("E1", EffectiveTime::MIN).is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Duplicate timestamps
// ═══════════════════════════════════════════════════════════════════════════

/// Rows for distinct members drawn from a handful of dates so that several
/// share an effective time. Input order is the row sequence.
fn crowded_rows() -> impl Strategy<Value = Vec<(u32, bool)>> {
    prop::collection::vec(((0u32..4).prop_map(|i| 20200101 + i * 10_000), any::<bool>()), 2..24)
}

proptest! {
    #[test]
    fn prop_same_time_ties_resolve_to_last_seen_active_row(
        rows in crowded_rows(),
        probe in (0u32..5).prop_map(|i| 20191231 + i * 10_000),
    ) {
        let raw: Vec<RawRow> = rows
            .iter()
            .enumerate()
            .map(|(i, &(time, active))| attribute("E1", &format!("m{i}"), time, active, &format!("V{i}")))
            .collect();
        let (index, _) = RelationIndex::from_rows("reasons", raw);

        let applicable = rows
            .iter()
            .enumerate()
            .filter(|&(_, &(time, active))| active && time <= probe);
        let latest = applicable.clone().map(|(_, &(time, _))| time).max();
        let expected = latest.and_then(|latest| {
            applicable
                .filter(|&(_, &(time, _))| time == latest)
                .map(|(i, _)| format!("V{i}"))
                .last()
        });

        let resolved = index.resolve("E1", t(probe)).and_then(|r| r.field(VALUE_FIELD)).map(str::to_string);
        prop_assert_eq!(resolved, expected);
    }
}
