//! # termdelta-rf2
//!
//! SNOMED CT RF2 release support: a lazy TSV reader with per-file column
//! mappings, semantic tag helpers, and the change reports (inactivations,
//! new concepts, FSN changes) wired onto the temporal engine.

pub mod reader;
pub mod report;
pub mod semantic_tag;

pub use reader::{Rf2Mapping, Rf2Reader};
pub use report::{
    fsn_change_report, inactivation_report, new_concept_report, tally, LabelChangeReport,
    Rf2Paths, Rf2Sources, TallyBy, TallyRow,
};
pub use semantic_tag::{semantic_tag, strip_semantic_tag};
