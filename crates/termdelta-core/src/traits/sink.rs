//! Sink contract.

use crate::errors::TermDeltaResult;
use crate::models::ChangeEventRecord;

/// Accepts resolved records in final order (ascending entity id, then event
/// time).
pub trait ChangeEventSink {
    fn accept(&mut self, record: ChangeEventRecord) -> TermDeltaResult<()>;

    /// Called once after the last record.
    fn finish(&mut self) -> TermDeltaResult<()> {
        Ok(())
    }
}

/// Collects records in memory.
#[derive(Debug, Default)]
pub struct VecSink {
    records: Vec<ChangeEventRecord>,
    finished: bool,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ChangeEventRecord] {
        &self.records
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn into_records(self) -> Vec<ChangeEventRecord> {
        self.records
    }
}

impl ChangeEventSink for VecSink {
    fn accept(&mut self, record: ChangeEventRecord) -> TermDeltaResult<()> {
        self.records.push(record);
        Ok(())
    }

    fn finish(&mut self) -> TermDeltaResult<()> {
        self.finished = true;
        Ok(())
    }
}
