//! Seams to the external collaborators: where rows come from and where
//! records go.

pub mod sink;
pub mod source;

pub use sink::{ChangeEventSink, VecSink};
pub use source::{MemorySource, SourceReader};
