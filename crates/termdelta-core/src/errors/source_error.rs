use super::error_code::{self, TermDeltaErrorCode};

/// Errors raised by Source Readers.
///
/// Only whole-source failures live here. A single malformed row is skipped and
/// counted by the reader, never surfaced as an error.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("I/O error reading {source_name}: {source}")]
    Io {
        source_name: String,
        source: std::io::Error,
    },

    #[error("{source_name} has no header line")]
    MissingHeader { source_name: String },

    #[error("{source_name} has no column named {column}")]
    MissingColumn { source_name: String, column: String },
}

impl TermDeltaErrorCode for SourceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::SOURCE_IO,
            Self::MissingHeader { .. } => error_code::MISSING_HEADER,
            Self::MissingColumn { .. } => error_code::MISSING_COLUMN,
        }
    }
}
