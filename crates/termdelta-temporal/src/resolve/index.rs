use rustc_hash::FxHashMap;

use termdelta_core::models::{EffectiveTime, RawRow, RunDiagnostics, VersionedRow};

use crate::timeline::{build_timelines, Timeline, TimelineSet};

struct Entry {
    timeline: Timeline,
    /// Positions of active rows in `timeline`, ascending.
    active: Vec<usize>,
}

impl Entry {
    fn new(timeline: Timeline) -> Self {
        let active = timeline
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row.active)
            .map(|(i, _)| i)
            .collect();
        Self { timeline, active }
    }

    /// Number of active rows with `effective_time <= at`.
    fn active_count_until(&self, at: EffectiveTime) -> usize {
        let rows = self.timeline.rows();
        self.active.partition_point(|&i| rows[i].effective_time <= at)
    }
}

/// Read-only index over one auxiliary relation, keyed by entity id.
///
/// Built once, then shared by reference across workers.
pub struct RelationIndex {
    name: String,
    entries: FxHashMap<String, Entry>,
}

impl RelationIndex {
    pub fn new(name: impl Into<String>, timelines: TimelineSet) -> Self {
        let entries = timelines
            .into_iter()
            .map(|t| (t.entity_id().to_string(), Entry::new(t)))
            .collect();
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Build the timelines and the index in one go.
    pub fn from_rows<I>(name: &str, rows: I) -> (Self, RunDiagnostics)
    where
        I: IntoIterator<Item = RawRow>,
    {
        let (timelines, diagnostics) = build_timelines(name, rows);
        (Self::new(name, timelines), diagnostics)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn timeline(&self, key: &str) -> Option<&Timeline> {
        self.entries.get(key).map(|e| &e.timeline)
    }

    /// The applicable row for `key` at `at`: the active row with the greatest
    /// `effective_time <= at`, last-seen among ties.
    pub fn resolve(&self, key: &str, at: EffectiveTime) -> Option<&VersionedRow> {
        let entry = self.entries.get(key)?;
        let n = entry.active_count_until(at);
        n.checked_sub(1)
            .map(|last| &entry.timeline.rows()[entry.active[last]])
    }

    /// Every active row for `key` with `effective_time <= at`, in timeline order.
    pub fn active_until(&self, key: &str, at: EffectiveTime) -> impl Iterator<Item = &VersionedRow> {
        let rows = self.entries.get(key).map(|entry| {
            let n = entry.active_count_until(at);
            entry.active[..n].iter().map(move |&i| &entry.timeline.rows()[i])
        });
        rows.into_iter().flatten()
    }

    /// Every row for `key` with `effective_time <= at`, active or not.
    pub fn rows_until(&self, key: &str, at: EffectiveTime) -> &[VersionedRow] {
        match self.entries.get(key) {
            Some(entry) => {
                let rows = entry.timeline.rows();
                &rows[..rows.partition_point(|r| r.effective_time <= at)]
            }
            None => &[],
        }
    }
}

impl std::fmt::Debug for RelationIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationIndex")
            .field("name", &self.name)
            .field("keys", &self.entries.len())
            .finish()
    }
}
