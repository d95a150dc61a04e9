pub mod error_code;
mod source_error;
mod temporal_error;
mod termdelta_error;

pub use error_code::TermDeltaErrorCode;
pub use source_error::SourceError;
pub use temporal_error::TemporalError;
pub use termdelta_error::{TermDeltaError, TermDeltaResult};
