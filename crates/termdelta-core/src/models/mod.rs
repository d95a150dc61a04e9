mod change_event;
mod diagnostics;
mod effective_time;
mod entity_id;
mod transition;
mod versioned_row;

pub use change_event::{
    AggregatedReference, ChangeEventRecord, LabelChange, RelationSet, ResolvedAttribute,
};
pub use diagnostics::{EntityFailure, RunDiagnostics};
pub use effective_time::EffectiveTime;
pub use entity_id::EntityId;
pub use transition::{EntityState, TransitionEvent, TransitionPredicate};
pub use versioned_row::{Payload, RawRow, RowRejection, VersionedRow};
