//! Relation Aggregator: every related reference applicable at a time.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use termdelta_core::models::{AggregatedReference, EffectiveTime, EntityId, RelationSet, VersionedRow};

use crate::resolve::{LabelResolver, RelationIndex, ResolveStats};

/// A one-to-many relation to aggregate per event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationSpec {
    pub name: String,
    pub relation: String,
    /// Payload field holding the related entity id.
    pub target_field: String,
    /// Payload field holding the link kind id, if the relation has one.
    pub kind_field: Option<String>,
    /// Stripped from the end of kind labels.
    pub kind_label_suffix: Option<String>,
}

impl AggregationSpec {
    pub fn new(
        name: impl Into<String>,
        relation: impl Into<String>,
        target_field: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            relation: relation.into(),
            target_field: target_field.into(),
            kind_field: None,
            kind_label_suffix: None,
        }
    }

    pub fn with_kind(mut self, field: impl Into<String>, label_suffix: Option<String>) -> Self {
        self.kind_field = Some(field.into());
        self.kind_label_suffix = label_suffix;
        self
    }
}

pub struct RelationAggregator<'a> {
    spec: &'a AggregationSpec,
    relation: &'a RelationIndex,
    labels: LabelResolver<'a>,
    latest_per_component: bool,
}

impl<'a> RelationAggregator<'a> {
    pub fn new(
        spec: &'a AggregationSpec,
        relation: &'a RelationIndex,
        labels: LabelResolver<'a>,
        latest_per_component: bool,
    ) -> Self {
        Self {
            spec,
            relation,
            labels,
            latest_per_component,
        }
    }

    pub fn spec(&self) -> &AggregationSpec {
        self.spec
    }

    /// References for `key` applicable at `at`, ordered by
    /// `(effective_time, target, kind)`.
    pub fn aggregate(&self, key: &str, at: EffectiveTime, stats: &mut ResolveStats) -> RelationSet {
        let mut references: Vec<AggregatedReference> = self
            .applicable_rows(key, at)
            .into_iter()
            .filter_map(|row| self.reference(row, at, stats))
            .collect();
        references.sort_by(|a, b| {
            a.effective_time
                .cmp(&b.effective_time)
                .then_with(|| a.target.cmp(&b.target))
                .then_with(|| a.kind.cmp(&b.kind))
        });
        RelationSet::new(references)
    }

    fn applicable_rows(&self, key: &str, at: EffectiveTime) -> Vec<&'a VersionedRow> {
        if !self.latest_per_component {
            return self.relation.active_until(key, at).collect();
        }
        // Later rows overwrite earlier ones, leaving each component's latest version.
        let mut latest: FxHashMap<&str, &VersionedRow> = FxHashMap::default();
        for row in self.relation.rows_until(key, at) {
            latest.insert(row.component(), row);
        }
        latest.into_values().filter(|row| row.active).collect()
    }

    fn reference(
        &self,
        row: &VersionedRow,
        at: EffectiveTime,
        stats: &mut ResolveStats,
    ) -> Option<AggregatedReference> {
        let Some(target) = row.field(&self.spec.target_field) else {
            debug!(
                aggregate = %self.spec.name,
                relation = self.relation.name(),
                entity_id = %row.entity_id,
                field = %self.spec.target_field,
                "related row has no target, skipped"
            );
            return None;
        };

        let target_label = match self.labels.label_at(target, at) {
            Some(label) => label.to_string(),
            None => {
                stats.labels_missing += 1;
                target.to_string()
            }
        };

        let kind = self
            .spec
            .kind_field
            .as_deref()
            .and_then(|field| row.field(field));
        let kind_label = kind.map(|kind| match self.labels.label_at(kind, at) {
            Some(label) => self.clean_kind_label(label),
            None => {
                stats.labels_missing += 1;
                kind.to_string()
            }
        });

        Some(AggregatedReference {
            kind: kind.map(EntityId::from),
            kind_label,
            target: EntityId::from(target),
            target_label,
            effective_time: row.effective_time,
        })
    }

    fn clean_kind_label(&self, label: &str) -> String {
        let label = match self.spec.kind_label_suffix.as_deref() {
            Some(suffix) => label.strip_suffix(suffix).unwrap_or(label),
            None => label,
        };
        label.trim().to_string()
    }
}
