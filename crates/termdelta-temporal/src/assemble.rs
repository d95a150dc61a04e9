//! Event Assembler: one transition event in, one change event record out.

use termdelta_core::config::EngineConfig;
use termdelta_core::errors::TemporalError;
use termdelta_core::models::{ChangeEventRecord, RelationSet, TransitionEvent};

use crate::aggregate::{AggregationSpec, RelationAggregator};
use crate::catalog::RelationCatalog;
use crate::resolve::{resolve_attribute, AttributeSpec, LabelResolver, LabelSpec, RelationIndex, ResolveStats};

/// Borrows the read-only indexes it needs; assembling has no side effects.
pub struct EventAssembler<'a> {
    labels: LabelResolver<'a>,
    attributes: Vec<(&'a AttributeSpec, &'a RelationIndex)>,
    aggregator: Option<RelationAggregator<'a>>,
    config: &'a EngineConfig,
}

impl<'a> EventAssembler<'a> {
    /// Looks every named relation up front, so a typo fails here rather than
    /// per event.
    pub fn new(
        catalog: &'a RelationCatalog,
        labels: &'a LabelSpec,
        attributes: &'a [AttributeSpec],
        aggregation: Option<&'a AggregationSpec>,
        config: &'a EngineConfig,
    ) -> Result<Self, TemporalError> {
        let labels = LabelResolver::new(catalog.get(&labels.relation)?, &labels.field);
        let attributes = attributes
            .iter()
            .map(|spec| -> Result<_, TemporalError> { Ok((spec, catalog.get(&spec.relation)?)) })
            .collect::<Result<Vec<_>, TemporalError>>()?;
        let aggregator = aggregation
            .map(|spec| {
                Ok::<_, TemporalError>(RelationAggregator::new(
                    spec,
                    catalog.get(&spec.relation)?,
                    labels,
                    config.latest_per_component,
                ))
            })
            .transpose()?;
        Ok(Self {
            labels,
            attributes,
            aggregator,
            config,
        })
    }

    pub fn assemble(&self, event: &TransitionEvent) -> (ChangeEventRecord, ResolveStats) {
        let mut stats = ResolveStats::default();
        let key = event.entity_id.as_str();
        let at = event.event_time;

        let label = match self.labels.label(key, at, self.config.label_policy) {
            Some(label) => label.to_string(),
            None => {
                stats.labels_missing += 1;
                self.config.missing_label.clone()
            }
        };

        let attributes = self
            .attributes
            .iter()
            .map(|(spec, relation)| {
                resolve_attribute(spec, relation, self.labels, key, at, self.config, &mut stats)
            })
            .collect();

        let related = match &self.aggregator {
            Some(aggregator) => aggregator.aggregate(key, at, &mut stats),
            None => RelationSet::default(),
        };

        let record = ChangeEventRecord {
            entity_id: event.entity_id.clone(),
            label,
            event_time: at,
            predicate: event.predicate.clone(),
            attributes,
            related,
        };
        (record, stats)
    }
}
