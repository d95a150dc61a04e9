use super::error_code::{self, TermDeltaErrorCode};

/// Temporal engine errors.
///
/// `EmptyTimeline` and `MixedKeys` are per-entity invariant violations: they
/// are collected into diagnostics and never abort a run. `InvalidPredicate`
/// and `UnknownRelation` are configuration mistakes raised when an engine is
/// built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemporalError {
    #[error("timeline for {entity_id} is empty")]
    EmptyTimeline { entity_id: String },

    #[error("timeline for {entity_id} contains a row keyed {found}")]
    MixedKeys { entity_id: String, found: String },

    #[error("invalid transition predicate {name}: {reason}")]
    InvalidPredicate { name: String, reason: String },

    #[error("unknown relation: {name}")]
    UnknownRelation { name: String },
}

impl TermDeltaErrorCode for TemporalError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyTimeline { .. } => error_code::EMPTY_TIMELINE,
            Self::MixedKeys { .. } => error_code::MIXED_TIMELINE_KEYS,
            Self::InvalidPredicate { .. } => error_code::INVALID_PREDICATE,
            Self::UnknownRelation { .. } => error_code::UNKNOWN_RELATION,
        }
    }
}
