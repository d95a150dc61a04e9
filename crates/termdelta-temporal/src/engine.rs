//! ChangeEngine: detection plus assembly over a whole timeline set.

use std::time::Instant;

use rayon::prelude::*;
use rayon::ThreadPool;
use serde::{Deserialize, Serialize};
use tracing::info;

use termdelta_core::config::EngineConfig;
use termdelta_core::errors::{TermDeltaError, TermDeltaResult};
use termdelta_core::models::{ChangeEventRecord, RunDiagnostics, TransitionPredicate};
use termdelta_core::traits::ChangeEventSink;

use crate::aggregate::AggregationSpec;
use crate::assemble::EventAssembler;
use crate::catalog::RelationCatalog;
use crate::detect::TransitionDetector;
use crate::resolve::{AttributeSpec, LabelSpec, RelationIndex, ResolveStats};
use crate::timeline::TimelineSet;

/// Records of one run, sorted by `(entity_id, event_time)`, and the counts
/// gathered while producing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub predicate: String,
    pub records: Vec<ChangeEventRecord>,
    pub diagnostics: RunDiagnostics,
}

/// Turns timelines into change event records.
///
/// Holds the read-only auxiliary indexes and what to resolve from them. One
/// engine can run several predicates over several timeline sets.
pub struct ChangeEngine {
    catalog: RelationCatalog,
    labels: LabelSpec,
    attributes: Vec<AttributeSpec>,
    aggregation: Option<AggregationSpec>,
    config: EngineConfig,
    pool: Option<ThreadPool>,
}

impl ChangeEngine {
    pub fn builder() -> ChangeEngineBuilder {
        ChangeEngineBuilder::default()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &RelationCatalog {
        &self.catalog
    }

    /// The record's related references joined with the configured separator.
    pub fn render_related(&self, record: &ChangeEventRecord) -> String {
        record.related.render(&self.config.relation_separator)
    }

    fn assembler(&self) -> TermDeltaResult<EventAssembler<'_>> {
        Ok(EventAssembler::new(
            &self.catalog,
            &self.labels,
            &self.attributes,
            self.aggregation.as_ref(),
            &self.config,
        )?)
    }

    /// Detect `predicate` on every timeline and assemble a record per event.
    pub fn run(&self, timelines: &TimelineSet, predicate: &TransitionPredicate) -> TermDeltaResult<RunReport> {
        let start = Instant::now();
        let assembler = self.assembler()?;
        let detector = TransitionDetector::new(predicate.clone());

        let assemble_all = || -> Vec<(ChangeEventRecord, ResolveStats)> {
            if self.config.parallel {
                timelines
                    .par_iter()
                    .filter_map(|t| detector.detect(t))
                    .map(|event| assembler.assemble(&event))
                    .collect()
            } else {
                timelines
                    .iter()
                    .filter_map(|t| detector.detect(t))
                    .map(|event| assembler.assemble(&event))
                    .collect()
            }
        };
        let assembled = match &self.pool {
            Some(pool) if self.config.parallel => pool.install(assemble_all),
            _ => assemble_all(),
        };

        let mut stats = ResolveStats::default();
        let mut records = Vec::with_capacity(assembled.len());
        for (record, record_stats) in assembled {
            stats.add(record_stats);
            records.push(record);
        }
        records.sort_by(|a, b| {
            a.entity_id
                .cmp(&b.entity_id)
                .then(a.event_time.cmp(&b.event_time))
        });

        let mut diagnostics = RunDiagnostics::default();
        stats.apply_to(&mut diagnostics);

        info!(
            predicate = predicate.name(),
            target_state = ?predicate.to_state(),
            entities = timelines.len(),
            events = records.len(),
            attributes_defaulted = diagnostics.attributes_defaulted,
            labels_missing = diagnostics.labels_missing,
            parallel = self.config.parallel,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "change events assembled"
        );

        Ok(RunReport {
            predicate: predicate.name().to_string(),
            records,
            diagnostics,
        })
    }

    /// [`ChangeEngine::run`], then hand the records to `sink` in order.
    pub fn run_into<S: ChangeEventSink + ?Sized>(
        &self,
        timelines: &TimelineSet,
        predicate: &TransitionPredicate,
        sink: &mut S,
    ) -> TermDeltaResult<RunDiagnostics> {
        let report = self.run(timelines, predicate)?;
        for record in report.records {
            sink.accept(record)?;
        }
        sink.finish()?;
        Ok(report.diagnostics)
    }
}

impl std::fmt::Debug for ChangeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeEngine")
            .field("relations", &self.catalog.names())
            .field("labels", &self.labels)
            .field("attributes", &self.attributes)
            .field("aggregation", &self.aggregation)
            .field("config", &self.config)
            .field("threads", &self.pool.as_ref().map(ThreadPool::current_num_threads))
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct ChangeEngineBuilder {
    catalog: RelationCatalog,
    labels: Option<LabelSpec>,
    attributes: Vec<AttributeSpec>,
    aggregation: Option<AggregationSpec>,
    config: EngineConfig,
}

impl ChangeEngineBuilder {
    pub fn relation(mut self, index: RelationIndex) -> Self {
        self.catalog.insert(index);
        self
    }

    pub fn labels(mut self, spec: LabelSpec) -> Self {
        self.labels = Some(spec);
        self
    }

    pub fn attribute(mut self, spec: AttributeSpec) -> Self {
        self.attributes.push(spec);
        self
    }

    pub fn aggregate(mut self, spec: AggregationSpec) -> Self {
        self.aggregation = Some(spec);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration and every relation name.
    pub fn build(self) -> TermDeltaResult<ChangeEngine> {
        self.config.validate()?;
        let labels = self
            .labels
            .ok_or_else(|| TermDeltaError::Config("no label relation configured".to_string()))?;
        EventAssembler::new(
            &self.catalog,
            &labels,
            &self.attributes,
            self.aggregation.as_ref(),
            &self.config,
        )?;

        let pool = match self.config.threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("termdelta-worker-{i}"))
                    .build()
                    .map_err(|e| TermDeltaError::Concurrency(e.to_string()))?,
            ),
            None => None,
        };

        Ok(ChangeEngine {
            catalog: self.catalog,
            labels,
            attributes: self.attributes,
            aggregation: self.aggregation,
            config: self.config,
            pool,
        })
    }
}
