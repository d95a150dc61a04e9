use serde::{Deserialize, Serialize};

use termdelta_core::config::{EngineConfig, LabelPolicy};
use termdelta_core::models::{EffectiveTime, ResolvedAttribute, RunDiagnostics};

use super::RelationIndex;

/// Where display labels come from: a relation and the payload field holding
/// the label text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSpec {
    pub relation: String,
    pub field: String,
}

impl LabelSpec {
    pub fn new(relation: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            field: field.into(),
        }
    }
}

/// A scalar fact resolved per event: `value_field` of the row in `relation`
/// applicable at the event time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub name: String,
    pub relation: String,
    pub value_field: String,
}

impl AttributeSpec {
    pub fn new(
        name: impl Into<String>,
        relation: impl Into<String>,
        value_field: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            relation: relation.into(),
            value_field: value_field.into(),
        }
    }
}

/// Sentinel usage counted while resolving one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub attributes_defaulted: u64,
    pub labels_missing: u64,
}

impl ResolveStats {
    pub fn add(&mut self, other: ResolveStats) {
        self.attributes_defaulted += other.attributes_defaulted;
        self.labels_missing += other.labels_missing;
    }

    pub fn apply_to(self, diagnostics: &mut RunDiagnostics) {
        diagnostics.attributes_defaulted += self.attributes_defaulted;
        diagnostics.labels_missing += self.labels_missing;
    }
}

/// Label lookups against one label relation.
#[derive(Debug, Clone, Copy)]
pub struct LabelResolver<'a> {
    index: &'a RelationIndex,
    field: &'a str,
}

impl<'a> LabelResolver<'a> {
    pub fn new(index: &'a RelationIndex, field: &'a str) -> Self {
        Self { index, field }
    }

    /// Label active for `key` at `at`.
    pub fn label_at(&self, key: &str, at: EffectiveTime) -> Option<&'a str> {
        self.index.resolve(key, at)?.field(self.field)
    }

    /// Label under a policy: `LatestActive` ignores `at`.
    pub fn label(&self, key: &str, at: EffectiveTime, policy: LabelPolicy) -> Option<&'a str> {
        match policy {
            LabelPolicy::LatestActive => self.label_at(key, EffectiveTime::MAX),
            LabelPolicy::AsOfEvent => self.label_at(key, at),
        }
    }
}

/// Resolve one attribute for `key` at `at`.
///
/// No applicable row gives the sentinel value and label. A value whose own
/// label cannot be found keeps the value and takes the sentinel label.
pub fn resolve_attribute(
    spec: &AttributeSpec,
    relation: &RelationIndex,
    labels: LabelResolver<'_>,
    key: &str,
    at: EffectiveTime,
    config: &EngineConfig,
    stats: &mut ResolveStats,
) -> ResolvedAttribute {
    let found = relation
        .resolve(key, at)
        .and_then(|row| Some((row.field(&spec.value_field)?, row.effective_time)));

    let Some((value, source_time)) = found else {
        stats.attributes_defaulted += 1;
        return ResolvedAttribute::sentinel(
            spec.name.as_str(),
            config.default_attribute_value.as_str(),
            config.default_attribute_label.as_str(),
        );
    };

    let label = match labels.label_at(value, at) {
        Some(label) => label.to_string(),
        None => {
            stats.labels_missing += 1;
            config.default_attribute_label.clone()
        }
    };

    ResolvedAttribute {
        name: spec.name.clone(),
        value: value.to_string(),
        label,
        source_time: Some(source_time),
        defaulted: false,
    }
}
