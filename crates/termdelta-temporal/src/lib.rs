//! # termdelta-temporal
//!
//! Temporal change engine: builds per-entity version timelines, detects the
//! first qualifying state transition, resolves auxiliary facts as of the
//! transition time, and assembles change event records.

pub mod aggregate;
pub mod assemble;
pub mod catalog;
pub mod detect;
pub mod engine;
pub mod label_change;
pub mod resolve;
pub mod timeline;

pub use aggregate::{AggregationSpec, RelationAggregator};
pub use assemble::EventAssembler;
pub use catalog::RelationCatalog;
pub use detect::TransitionDetector;
pub use engine::{ChangeEngine, ChangeEngineBuilder, RunReport};
pub use label_change::detect_label_changes;
pub use resolve::{AttributeSpec, LabelResolver, LabelSpec, RelationIndex, ResolveStats};
pub use timeline::{build_timelines, Timeline, TimelineBuilder, TimelineSet};
