//! Source Reader contract.

use crate::errors::SourceError;
use crate::models::{RawRow, RunDiagnostics};

/// Yields the rows of one table: the primary entity table or one auxiliary
/// relation.
///
/// Malformed input lines are the reader's to skip; they are counted in
/// [`SourceReader::diagnostics`] and never yielded. An `Err` item means the
/// source itself failed (I/O) and iteration should stop.
pub trait SourceReader: Iterator<Item = Result<RawRow, SourceError>> {
    fn source_name(&self) -> &str;

    /// Counts so far: `rows_read`, `rows_malformed`, `rows_filtered`.
    fn diagnostics(&self) -> RunDiagnostics;
}

impl<S: SourceReader + ?Sized> SourceReader for Box<S> {
    fn source_name(&self) -> &str {
        (**self).source_name()
    }

    fn diagnostics(&self) -> RunDiagnostics {
        (**self).diagnostics()
    }
}

/// In-memory source over pre-built rows.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    rows: std::vec::IntoIter<RawRow>,
    read: u64,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, rows: Vec<RawRow>) -> Self {
        Self {
            name: name.into(),
            rows: rows.into_iter(),
            read: 0,
        }
    }
}

impl Iterator for MemorySource {
    type Item = Result<RawRow, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        self.read += 1;
        Some(Ok(row))
    }
}

impl SourceReader for MemorySource {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn diagnostics(&self) -> RunDiagnostics {
        RunDiagnostics {
            rows_read: self.read,
            ..Default::default()
        }
    }
}
