use serde::{Deserialize, Serialize};

use super::{EffectiveTime, EntityId};

/// An auxiliary fact resolved as of an event time.
///
/// When nothing qualified, `defaulted` is set and `value`/`label` carry the
/// configured sentinels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAttribute {
    pub name: String,
    pub value: String,
    pub label: String,
    pub source_time: Option<EffectiveTime>,
    pub defaulted: bool,
}

impl ResolvedAttribute {
    pub fn sentinel(name: impl Into<String>, value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            label: label.into(),
            source_time: None,
            defaulted: true,
        }
    }
}

/// One related entity reference from a one-to-many relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedReference {
    pub kind: Option<EntityId>,
    pub kind_label: Option<String>,
    pub target: EntityId,
    pub target_label: String,
    pub effective_time: EffectiveTime,
}

impl AggregatedReference {
    /// `"<kind label> -> <target label>"`, or the target label alone.
    pub fn display(&self) -> String {
        match &self.kind_label {
            Some(kind) => format!("{kind} -> {}", self.target_label),
            None => self.target_label.clone(),
        }
    }
}

/// Ordered references; renders as one composite value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationSet(Vec<AggregatedReference>);

impl RelationSet {
    pub fn new(references: Vec<AggregatedReference>) -> Self {
        Self(references)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AggregatedReference> {
        self.0.iter()
    }

    /// Join the display values; an empty set renders as `""`.
    pub fn render(&self, separator: &str) -> String {
        self.0
            .iter()
            .map(AggregatedReference::display)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// The unit handed to a Sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEventRecord {
    pub entity_id: EntityId,
    pub label: String,
    pub event_time: EffectiveTime,
    pub predicate: String,
    pub attributes: Vec<ResolvedAttribute>,
    pub related: RelationSet,
}

impl ChangeEventRecord {
    pub fn attribute(&self, name: &str) -> Option<&ResolvedAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// A change of canonical label between two adjacent distinct label versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelChange {
    pub entity_id: EntityId,
    pub before_time: EffectiveTime,
    pub before_label: String,
    pub after_time: EffectiveTime,
    pub after_label: String,
}
