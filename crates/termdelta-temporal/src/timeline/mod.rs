//! Version Timeline Builder: per-entity ordered version histories.

mod builder;

pub use builder::{build_timelines, TimelineBuilder};

use std::collections::BTreeMap;

use rayon::prelude::*;
use rustc_hash::FxHashSet;

use termdelta_core::errors::TemporalError;
use termdelta_core::models::{EntityId, VersionedRow};

/// Ordered version history of one entity.
///
/// Invariants: non-empty, every row keyed by `entity_id`, `effective_time`
/// non-decreasing. Among rows of the same component with the same
/// `effective_time` only the last-seen one is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    entity_id: EntityId,
    rows: Vec<VersionedRow>,
    superseded: u64,
}

impl Timeline {
    /// Build from the rows of one entity, in any order.
    ///
    /// Rows are sorted by `(effective_time, sequence)` with a stable sort, so
    /// rows sharing a sequence number keep their vector order.
    pub fn from_rows(entity_id: EntityId, mut rows: Vec<VersionedRow>) -> Result<Self, TemporalError> {
        if rows.is_empty() {
            return Err(TemporalError::EmptyTimeline {
                entity_id: entity_id.into_inner(),
            });
        }
        if let Some(stray) = rows.iter().find(|r| r.entity_id != entity_id) {
            return Err(TemporalError::MixedKeys {
                entity_id: entity_id.into_inner(),
                found: stray.entity_id.to_string(),
            });
        }

        rows.sort_by_key(|r| (r.effective_time, r.sequence));

        let keep = last_seen_mask(&rows);
        let before = rows.len();
        let rows: Vec<VersionedRow> = rows
            .into_iter()
            .zip(keep)
            .filter_map(|(row, keep)| keep.then_some(row))
            .collect();
        let superseded = (before - rows.len()) as u64;

        Ok(Self {
            entity_id,
            rows,
            superseded,
        })
    }

    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    pub fn rows(&self) -> &[VersionedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Never true for a built timeline.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> &VersionedRow {
        &self.rows[0]
    }

    pub fn last(&self) -> &VersionedRow {
        &self.rows[self.rows.len() - 1]
    }

    /// Duplicate-timestamp rows dropped while building.
    pub fn superseded(&self) -> u64 {
        self.superseded
    }

    /// Whether the latest version is active.
    pub fn is_currently_active(&self) -> bool {
        self.last().active
    }
}

/// Within each run of equal `effective_time`, mark the last occurrence of
/// every component as kept.
fn last_seen_mask(rows: &[VersionedRow]) -> Vec<bool> {
    let mut keep = vec![false; rows.len()];
    let mut start = 0;
    while start < rows.len() {
        let time = rows[start].effective_time;
        let end = start
            + rows[start..]
                .iter()
                .take_while(|r| r.effective_time == time)
                .count();
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for i in (start..end).rev() {
            keep[i] = seen.insert(rows[i].component());
        }
        start = end;
    }
    keep
}

/// All timelines of one table, iterated in `EntityId` order.
#[derive(Debug, Clone, Default)]
pub struct TimelineSet {
    timelines: BTreeMap<EntityId, Timeline>,
}

impl TimelineSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, timeline: Timeline) -> Option<Timeline> {
        self.timelines.insert(timeline.entity_id.clone(), timeline)
    }

    pub fn get(&self, entity_id: &EntityId) -> Option<&Timeline> {
        self.timelines.get(entity_id)
    }

    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Timeline> {
        self.timelines.values()
    }

    pub fn par_iter(&self) -> impl ParallelIterator<Item = &Timeline> {
        self.timelines.par_iter().map(|(_, timeline)| timeline)
    }

    /// Entities whose latest version is active, in id order.
    pub fn currently_active(&self) -> Vec<EntityId> {
        self.iter()
            .filter(|t| t.is_currently_active())
            .map(|t| t.entity_id.clone())
            .collect()
    }
}

impl IntoIterator for TimelineSet {
    type Item = Timeline;
    type IntoIter = std::collections::btree_map::IntoValues<EntityId, Timeline>;

    fn into_iter(self) -> Self::IntoIter {
        self.timelines.into_values()
    }
}
