//! As-Of Resolver: point-in-time lookups against auxiliary relations.

mod as_of;
mod index;

pub use as_of::{resolve_attribute, AttributeSpec, LabelResolver, LabelSpec, ResolveStats};
pub use index::RelationIndex;
