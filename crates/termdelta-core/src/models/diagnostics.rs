use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::RowRejection;
use crate::errors::{TemporalError, TermDeltaErrorCode};

/// An entity the engine could not process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFailure {
    pub entity_id: String,
    pub code: String,
    pub message: String,
}

impl EntityFailure {
    pub fn from_error(entity_id: impl Into<String>, error: &TemporalError) -> Self {
        Self {
            entity_id: entity_id.into(),
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Data-quality counters for a run. Nothing here aborts processing; it only
/// makes skipped and defaulted data visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDiagnostics {
    /// Rows handed to a timeline builder (or read by a source, for source-side counts).
    pub rows_read: u64,
    /// Lines the Source Reader could not split into the expected fields.
    pub rows_malformed: u64,
    /// Well-formed lines the Source Reader's filters excluded.
    pub rows_filtered: u64,
    pub rows_rejected: BTreeMap<RowRejection, u64>,
    pub duplicates_superseded: u64,
    pub attributes_defaulted: u64,
    pub labels_missing: u64,
    pub entity_failures: Vec<EntityFailure>,
}

impl RunDiagnostics {
    pub fn record_rejection(&mut self, reason: RowRejection) {
        *self.rows_rejected.entry(reason).or_insert(0) += 1;
    }

    pub fn rows_rejected_total(&self) -> u64 {
        self.rows_rejected.values().sum()
    }

    /// Every row that did not make it into a timeline.
    pub fn rows_skipped(&self) -> u64 {
        self.rows_malformed + self.rows_rejected_total()
    }

    pub fn merge(&mut self, other: RunDiagnostics) {
        self.rows_read += other.rows_read;
        self.rows_malformed += other.rows_malformed;
        self.rows_filtered += other.rows_filtered;
        for (reason, count) in other.rows_rejected {
            *self.rows_rejected.entry(reason).or_insert(0) += count;
        }
        self.duplicates_superseded += other.duplicates_superseded;
        self.attributes_defaulted += other.attributes_defaulted;
        self.labels_missing += other.labels_missing;
        self.entity_failures.extend(other.entity_failures);
    }
}
