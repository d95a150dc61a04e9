//! Grouping raw rows into timelines.

use std::time::Instant;

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use termdelta_core::errors::SourceError;
use termdelta_core::models::{EntityFailure, EntityId, RawRow, RunDiagnostics, VersionedRow};
use termdelta_core::traits::SourceReader;

use super::{Timeline, TimelineSet};

/// Accumulates rows for one table and turns them into a [`TimelineSet`].
///
/// A group is only final once every row has been seen, so nothing is emitted
/// before [`TimelineBuilder::finish`].
pub struct TimelineBuilder {
    name: String,
    groups: FxHashMap<EntityId, Vec<VersionedRow>>,
    next_sequence: u64,
    diagnostics: RunDiagnostics,
}

impl TimelineBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: FxHashMap::default(),
            next_sequence: 0,
            diagnostics: RunDiagnostics::default(),
        }
    }

    /// Validate and group one raw row. Malformed rows are counted and dropped.
    pub fn push(&mut self, raw: RawRow) {
        self.diagnostics.rows_read += 1;
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        match raw.into_versioned(sequence) {
            Ok(row) => self.groups.entry(row.entity_id.clone()).or_default().push(row),
            Err(reason) => {
                debug!(table = %self.name, sequence, reason = reason.as_str(), "row skipped");
                self.diagnostics.record_rejection(reason);
            }
        }
    }

    /// Group an already validated row. Its sequence is re-stamped so input
    /// order stays the tie-break.
    pub fn push_row(&mut self, row: VersionedRow) {
        self.diagnostics.rows_read += 1;
        let row = row.with_sequence(self.next_sequence);
        self.next_sequence += 1;
        self.groups.entry(row.entity_id.clone()).or_default().push(row);
    }

    /// Drain a Source Reader, folding its malformed/filtered counts in.
    pub fn ingest<S: SourceReader>(&mut self, mut source: S) -> Result<(), SourceError> {
        for item in source.by_ref() {
            self.push(item?);
        }
        let counts = source.diagnostics();
        self.diagnostics.rows_malformed += counts.rows_malformed;
        self.diagnostics.rows_filtered += counts.rows_filtered;
        Ok(())
    }

    pub fn finish(self) -> (TimelineSet, RunDiagnostics) {
        let start = Instant::now();
        let mut diagnostics = self.diagnostics;
        let mut set = TimelineSet::new();

        for (entity_id, rows) in self.groups {
            let key = entity_id.to_string();
            match Timeline::from_rows(entity_id, rows) {
                Ok(timeline) => {
                    diagnostics.duplicates_superseded += timeline.superseded();
                    set.insert(timeline);
                }
                Err(e) => {
                    warn!(table = %self.name, entity_id = %key, error = %e, "timeline rejected");
                    diagnostics.entity_failures.push(EntityFailure::from_error(key, &e));
                }
            }
        }

        info!(
            table = %self.name,
            entities = set.len(),
            rows_read = diagnostics.rows_read,
            rows_skipped = diagnostics.rows_skipped(),
            rows_filtered = diagnostics.rows_filtered,
            duplicates_superseded = diagnostics.duplicates_superseded,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "timelines built"
        );
        (set, diagnostics)
    }
}

impl Extend<RawRow> for TimelineBuilder {
    fn extend<I: IntoIterator<Item = RawRow>>(&mut self, rows: I) {
        for raw in rows {
            self.push(raw);
        }
    }
}

/// One-shot helper: group `rows` into timelines.
pub fn build_timelines<I>(name: &str, rows: I) -> (TimelineSet, RunDiagnostics)
where
    I: IntoIterator<Item = RawRow>,
{
    let mut builder = TimelineBuilder::new(name);
    builder.extend(rows);
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use termdelta_core::models::RowRejection;
    use termdelta_core::traits::MemorySource;

    fn raw(key: &str, time: &str, active: &str) -> RawRow {
        RawRow {
            key: Some(key.to_string()),
            effective_time: Some(time.to_string()),
            active: Some(active.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn groups_scattered_rows_by_key() {
        let (set, diag) = build_timelines(
            "concepts",
            vec![
                raw("A", "20210101", "0"),
                raw("B", "20200101", "1"),
                raw("A", "20200101", "1"),
            ],
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(&"A".into()).unwrap().len(), 2);
        assert_eq!(diag.rows_read, 3);
        assert_eq!(diag.rows_skipped(), 0);
    }

    #[test]
    fn malformed_rows_are_counted_not_fatal() {
        let (set, diag) = build_timelines(
            "concepts",
            vec![
                raw("A", "20200101", "1"),
                raw("A", "not-a-date", "1"),
                raw("", "20200101", "1"),
                raw("B", "20200101", "2"),
            ],
        );
        assert_eq!(set.len(), 1);
        assert_eq!(diag.rows_rejected_total(), 3);
        assert_eq!(diag.rows_rejected[&RowRejection::InvalidEffectiveTime], 1);
        assert_eq!(diag.rows_rejected[&RowRejection::MissingKey], 1);
        assert_eq!(diag.rows_rejected[&RowRejection::InvalidActive], 1);
    }

    #[test]
    fn ingest_tracks_source_counts() {
        let mut builder = TimelineBuilder::new("concepts");
        builder
            .ingest(MemorySource::new("mem", vec![raw("A", "20200101", "1")]))
            .unwrap();
        let (set, diag) = builder.finish();
        assert_eq!(set.len(), 1);
        assert_eq!(diag.rows_read, 1);
    }

    #[test]
    fn push_row_uses_arrival_order_for_ties() {
        let t = termdelta_core::models::EffectiveTime::from_yyyymmdd(20220101).unwrap();
        let mut builder = TimelineBuilder::new("labels");
        builder.push_row(VersionedRow::new("E", t, true).with_field("term", "old").with_sequence(9));
        builder.push_row(VersionedRow::new("E", t, true).with_field("term", "new").with_sequence(1));
        let (set, diag) = builder.finish();
        assert_eq!(set.get(&"E".into()).unwrap().first().field("term"), Some("new"));
        assert_eq!(diag.duplicates_superseded, 1);
    }
}
