use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use termdelta_core::models::{ChangeEventRecord, EffectiveTime};

use crate::semantic_tag::{semantic_tag, strip_semantic_tag};

/// How records are grouped into categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TallyBy {
    /// The named attribute's label, semantic tag removed.
    AttributeLabel(String),
    /// The semantic tag of the record's own label. Untagged records are left out.
    SemanticTag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyRow {
    pub event_time: EffectiveTime,
    pub category: String,
    pub count: u64,
}

/// Count records per `(event_time, category)`, in that order.
pub fn tally(records: &[ChangeEventRecord], by: &TallyBy) -> Vec<TallyRow> {
    let mut counts: BTreeMap<(EffectiveTime, String), u64> = BTreeMap::new();
    for record in records {
        let category = match by {
            TallyBy::AttributeLabel(name) => record
                .attribute(name)
                .map(|a| strip_semantic_tag(&a.label).to_string()),
            TallyBy::SemanticTag => semantic_tag(&record.label).map(str::to_string),
        };
        if let Some(category) = category {
            *counts.entry((record.event_time, category)).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|((event_time, category), count)| TallyRow {
            event_time,
            category,
            count,
        })
        .collect()
}
