//! # termdelta-core
//!
//! Foundation crate for the termdelta change engine.
//! Defines the row/record model, errors, config, the Source and Sink traits,
//! and tracing setup. Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod telemetry;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{EngineConfig, LabelPolicy, Rf2Config, TermDeltaConfig};
pub use errors::{TermDeltaError, TermDeltaErrorCode, TermDeltaResult};
pub use models::{
    AggregatedReference, ChangeEventRecord, EffectiveTime, EntityId, EntityState, LabelChange,
    EntityFailure, Payload, RawRow, RelationSet, ResolvedAttribute, RowRejection, RunDiagnostics,
    TransitionEvent, TransitionPredicate, VersionedRow,
};
pub use traits::{ChangeEventSink, MemorySource, SourceReader, VecSink};
