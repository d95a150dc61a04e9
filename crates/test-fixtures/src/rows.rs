//! Row builders. Times are `YYYYMMDD` integers and must be valid dates.

use termdelta_core::models::{EffectiveTime, Payload, RawRow};

pub const FSN_FIELD: &str = "term";
pub const VALUE_FIELD: &str = "valueId";
pub const TARGET_FIELD: &str = "targetComponentId";
pub const REFSET_FIELD: &str = "refsetId";

/// Panics on an invalid date; fixtures only.
pub fn t(value: u32) -> EffectiveTime {
    EffectiveTime::from_yyyymmdd(value)
        .unwrap_or_else(|| panic!("fixture time {value} is not a valid YYYYMMDD date"))
}

fn raw_row(key: &str, component: Option<&str>, time: u32, active: bool, payload: Payload) -> RawRow {
    RawRow {
        key: Some(key.to_string()),
        component: component.map(str::to_string),
        effective_time: Some(format!("{time:08}")),
        active: Some(if active { "1" } else { "0" }.to_string()),
        payload,
    }
}

/// A bare entity row.
pub fn entity(key: &str, time: u32, active: bool) -> RawRow {
    raw_row(key, None, time, active, Payload::new())
}

/// An FSN description row keyed by its concept.
pub fn label(concept: &str, description: &str, time: u32, active: bool, term: &str) -> RawRow {
    raw_row(
        concept,
        Some(description),
        time,
        active,
        [(FSN_FIELD, term)].into_iter().collect(),
    )
}

/// An attribute-value refset member keyed by the referenced component.
pub fn attribute(concept: &str, member: &str, time: u32, active: bool, value: &str) -> RawRow {
    raw_row(
        concept,
        Some(member),
        time,
        active,
        [(VALUE_FIELD, value)].into_iter().collect(),
    )
}

/// A historical association member keyed by the referenced component.
pub fn association(
    concept: &str,
    member: &str,
    time: u32,
    active: bool,
    refset: &str,
    target: &str,
) -> RawRow {
    raw_row(
        concept,
        Some(member),
        time,
        active,
        [(REFSET_FIELD, refset), (TARGET_FIELD, target)]
            .into_iter()
            .collect(),
    )
}
