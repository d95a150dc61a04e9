use super::error_code::{self, TermDeltaErrorCode};
use super::{SourceError, TemporalError};

/// Top-level error type for termdelta.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum TermDeltaError {
    #[error("temporal error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("config error: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("concurrency error: {0}")]
    Concurrency(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TermDeltaErrorCode for TermDeltaError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Temporal(e) => e.error_code(),
            Self::Source(e) => e.error_code(),
            Self::Config(_) | Self::ConfigParse(_) => error_code::CONFIG_ERROR,
            Self::Concurrency(_) => error_code::CONCURRENCY_ERROR,
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}

/// Convenience type alias.
pub type TermDeltaResult<T> = Result<T, TermDeltaError>;
