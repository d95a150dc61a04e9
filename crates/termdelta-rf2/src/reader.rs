//! RF2 release file reader.
//!
//! RF2 files are UTF-8, tab separated, with a header line naming the columns.
//! Lines are read lazily as raw bytes; a line that is not valid UTF-8 or whose
//! field count differs from the header is skipped and counted, never fatal.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use termdelta_core::config::Rf2Config;
use termdelta_core::errors::SourceError;
use termdelta_core::models::{Payload, RawRow, RunDiagnostics};
use termdelta_core::traits::SourceReader;

pub const EFFECTIVE_TIME: &str = "effectiveTime";
pub const ACTIVE: &str = "active";

/// Which columns of an RF2 file become a row's key, component and payload,
/// and which rows are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rf2Mapping {
    pub key: String,
    pub component: Option<String>,
    pub payload: Vec<String>,
    /// Keep a row only if the column holds one of the listed values.
    pub filters: Vec<(String, Vec<String>)>,
}

impl Rf2Mapping {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            component: None,
            payload: Vec::new(),
            filters: Vec::new(),
        }
    }

    pub fn component(mut self, column: impl Into<String>) -> Self {
        self.component = Some(column.into());
        self
    }

    pub fn payload<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.payload.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn filter<I, S>(mut self, column: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters
            .push((column.into(), allowed.into_iter().map(Into::into).collect()));
        self
    }

    /// `sct2_Concept_*`: one row per concept version.
    pub fn concepts() -> Self {
        Self::new("id").payload(["moduleId", "definitionStatusId"])
    }

    /// `sct2_Description_*` restricted to fully specified names, keyed by concept.
    pub fn fsn_descriptions(config: &Rf2Config) -> Self {
        Self::new("conceptId")
            .component("id")
            .payload(["term", "languageCode", "typeId"])
            .filter("typeId", [config.fsn_type_id.as_str()])
    }

    /// Concept inactivation indicator members, keyed by the inactive concept.
    pub fn inactivation_indicators(config: &Rf2Config) -> Self {
        Self::new("referencedComponentId")
            .component("id")
            .payload(["refsetId", "valueId"])
            .filter("refsetId", [config.inactivation_refset_id.as_str()])
    }

    /// Historical association members, keyed by the inactive concept.
    pub fn historical_associations(config: &Rf2Config) -> Self {
        Self::new("referencedComponentId")
            .component("id")
            .payload(["refsetId", "targetComponentId"])
            .filter("refsetId", config.historical_refset_ids.iter().map(String::as_str))
    }
}

struct Columns {
    key: usize,
    component: Option<usize>,
    effective_time: usize,
    active: usize,
    payload: Vec<(String, usize)>,
    filters: Vec<(usize, Vec<String>)>,
}

impl Columns {
    fn resolve(source_name: &str, header: &[&str], mapping: &Rf2Mapping) -> Result<Self, SourceError> {
        let find = |column: &str| {
            header
                .iter()
                .position(|h| *h == column)
                .ok_or_else(|| SourceError::MissingColumn {
                    source_name: source_name.to_string(),
                    column: column.to_string(),
                })
        };
        Ok(Self {
            key: find(&mapping.key)?,
            component: mapping.component.as_deref().map(find).transpose()?,
            effective_time: find(EFFECTIVE_TIME)?,
            active: find(ACTIVE)?,
            payload: mapping
                .payload
                .iter()
                .map(|c| -> Result<_, SourceError> { Ok((c.clone(), find(c)?)) })
                .collect::<Result<_, SourceError>>()?,
            filters: mapping
                .filters
                .iter()
                .map(|(c, allowed)| -> Result<_, SourceError> { Ok((find(c)?, allowed.clone())) })
                .collect::<Result<_, SourceError>>()?,
        })
    }
}

/// Lazy row source over one RF2 file.
pub struct Rf2Reader<R> {
    name: String,
    reader: R,
    buf: Vec<u8>,
    columns: Columns,
    width: usize,
    line_number: u64,
    diagnostics: RunDiagnostics,
    failed: bool,
}

impl<R: BufRead> Rf2Reader<R> {
    /// Read the header and resolve the mapping's columns against it.
    ///
    /// A header that is not UTF-8 is an I/O error: without it no column can
    /// be found.
    pub fn new(name: impl Into<String>, mut reader: R, mapping: &Rf2Mapping) -> Result<Self, SourceError> {
        let name = name.into();
        let io_err = |source| SourceError::Io {
            source_name: name.clone(),
            source,
        };
        let mut buf = Vec::new();
        if !read_line(&mut reader, &mut buf).map_err(io_err)? {
            return Err(SourceError::MissingHeader { source_name: name });
        }
        let header = std::str::from_utf8(&buf)
            .map_err(|e| io_err(io::Error::new(io::ErrorKind::InvalidData, e)))?
            .trim_start_matches('\u{feff}');
        if header.is_empty() {
            return Err(SourceError::MissingHeader { source_name: name });
        }
        let fields: Vec<&str> = header.split('\t').collect();
        let columns = Columns::resolve(&name, &fields, mapping)?;
        let width = fields.len();
        buf.clear();
        Ok(Self {
            width,
            name,
            reader,
            buf,
            columns,
            line_number: 1,
            diagnostics: RunDiagnostics::default(),
            failed: false,
        })
    }

    /// `None` when the line is filtered out.
    fn row(&self, fields: &[&str]) -> Option<RawRow> {
        let c = &self.columns;
        let keep = c
            .filters
            .iter()
            .all(|(i, allowed)| allowed.iter().any(|a| a == fields[*i]));
        if !keep {
            return None;
        }
        let payload: Payload = c
            .payload
            .iter()
            .map(|(name, i)| (name.as_str(), fields[*i]))
            .collect();
        Some(RawRow {
            key: Some(fields[c.key].to_string()),
            component: c.component.map(|i| fields[i].to_string()),
            effective_time: Some(fields[c.effective_time].to_string()),
            active: Some(fields[c.active].to_string()),
            payload,
        })
    }
}

/// Read one line into `buf` without its line terminator. `Ok(false)` at end
/// of input.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    Ok(true)
}

impl Rf2Reader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>, mapping: &Rf2Mapping) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let file = File::open(path).map_err(|source| SourceError::Io {
            source_name: name.clone(),
            source,
        })?;
        Self::new(name, BufReader::new(file), mapping)
    }
}

impl<R: BufRead> Iterator for Rf2Reader<R> {
    type Item = Result<RawRow, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            match read_line(&mut self.reader, &mut self.buf) {
                Ok(true) => {}
                Err(source) => {
                    self.failed = true;
                    return Some(Err(SourceError::Io {
                        source_name: self.name.clone(),
                        source,
                    }));
                }
                Ok(false) => {
                    info!(
                        source = %self.name,
                        rows_read = self.diagnostics.rows_read,
                        rows_malformed = self.diagnostics.rows_malformed,
                        rows_filtered = self.diagnostics.rows_filtered,
                        "source exhausted"
                    );
                    self.failed = true;
                    return None;
                }
            }
            self.line_number += 1;

            if self.buf.is_empty() {
                continue;
            }
            self.diagnostics.rows_read += 1;

            let line = match std::str::from_utf8(&self.buf) {
                Ok(line) => line,
                Err(e) => {
                    debug!(
                        source = %self.name,
                        line = self.line_number,
                        error = %e,
                        "line is not valid UTF-8, skipped"
                    );
                    self.diagnostics.rows_malformed += 1;
                    continue;
                }
            };

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != self.width {
                debug!(
                    source = %self.name,
                    line = self.line_number,
                    fields = fields.len(),
                    expected = self.width,
                    "malformed line skipped"
                );
                self.diagnostics.rows_malformed += 1;
                continue;
            }
            match self.row(&fields) {
                Some(row) => return Some(Ok(row)),
                None => self.diagnostics.rows_filtered += 1,
            }
        }
    }
}

impl<R: BufRead> SourceReader for Rf2Reader<R> {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn diagnostics(&self) -> RunDiagnostics {
        self.diagnostics.clone()
    }
}
