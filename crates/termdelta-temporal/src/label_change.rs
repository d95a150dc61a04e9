//! Label Change Detector: every change of canonical label over time.

use rayon::prelude::*;

use termdelta_core::models::{EntityId, LabelChange};

use crate::resolve::RelationIndex;

/// Label changes of `entities` from the active rows of a label relation.
///
/// Consecutive identical labels collapse into one version; each adjacent pair
/// of distinct versions yields a change. Output is ordered by
/// `(entity_id, after_time)`.
pub fn detect_label_changes(
    labels: &RelationIndex,
    field: &str,
    entities: &[EntityId],
    parallel: bool,
) -> Vec<LabelChange> {
    let per_entity = |id: &EntityId| label_changes_of(labels, field, id);
    let mut changes: Vec<LabelChange> = if parallel {
        entities.par_iter().flat_map_iter(per_entity).collect()
    } else {
        entities.iter().flat_map(per_entity).collect()
    };
    changes.sort_by(|a, b| {
        a.entity_id
            .cmp(&b.entity_id)
            .then(a.after_time.cmp(&b.after_time))
    });
    changes
}

fn label_changes_of(labels: &RelationIndex, field: &str, id: &EntityId) -> Vec<LabelChange> {
    let Some(timeline) = labels.timeline(id.as_str()) else {
        return Vec::new();
    };

    let mut versions = timeline
        .rows()
        .iter()
        .filter(|row| row.active)
        .filter_map(|row| Some((row.effective_time, row.field(field)?)))
        .collect::<Vec<_>>();
    versions.dedup_by(|later, earlier| later.1 == earlier.1);

    versions
        .windows(2)
        .map(|pair| LabelChange {
            entity_id: id.clone(),
            before_time: pair[0].0,
            before_label: pair[0].1.to_string(),
            after_time: pair[1].0,
            after_label: pair[1].1.to_string(),
        })
        .collect()
}
