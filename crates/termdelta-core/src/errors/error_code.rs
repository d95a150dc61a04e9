//! Stable string codes for every error variant.
//!
//! Codes are part of the diagnostics surface: they are what ends up in
//! `RunDiagnostics` failure entries and log fields, so they never change once
//! published.

/// Implemented by every error enum in the workspace.
pub trait TermDeltaErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const EMPTY_TIMELINE: &str = "EMPTY_TIMELINE";
pub const MIXED_TIMELINE_KEYS: &str = "MIXED_TIMELINE_KEYS";
pub const INVALID_PREDICATE: &str = "INVALID_PREDICATE";
pub const UNKNOWN_RELATION: &str = "UNKNOWN_RELATION";
pub const SOURCE_IO: &str = "SOURCE_IO";
pub const MISSING_HEADER: &str = "MISSING_HEADER";
pub const MISSING_COLUMN: &str = "MISSING_COLUMN";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CONCURRENCY_ERROR: &str = "CONCURRENCY_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
