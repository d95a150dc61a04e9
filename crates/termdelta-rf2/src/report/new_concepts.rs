use tracing::info;

use termdelta_core::config::TermDeltaConfig;
use termdelta_core::errors::{SourceError, TermDeltaResult};
use termdelta_core::models::{EffectiveTime, RawRow, RunDiagnostics, TransitionPredicate};
use termdelta_core::traits::SourceReader;
use termdelta_temporal::{ChangeEngine, LabelSpec, RunReport};

use super::{load, load_index, Rf2Sources, FSN, TERM};

/// Drops rows stamped with one of `excluded` times, counting them as filtered.
///
/// Rows whose time does not parse pass through so the timeline builder can
/// reject them with a reason.
pub struct ExcludeTimes<S> {
    inner: S,
    excluded: Vec<EffectiveTime>,
    filtered: u64,
}

impl<S: SourceReader> ExcludeTimes<S> {
    pub fn new(inner: S, excluded: &[u32]) -> Self {
        Self {
            inner,
            excluded: excluded
                .iter()
                .filter_map(|&t| EffectiveTime::from_yyyymmdd(t))
                .collect(),
            filtered: 0,
        }
    }

    fn is_excluded(&self, row: &RawRow) -> bool {
        row.effective_time
            .as_deref()
            .and_then(EffectiveTime::parse)
            .is_some_and(|t| self.excluded.contains(&t))
    }
}

impl<S: SourceReader> Iterator for ExcludeTimes<S> {
    type Item = Result<RawRow, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(row) if self.is_excluded(&row) => self.filtered += 1,
                other => return Some(other),
            }
        }
    }
}

impl<S: SourceReader> SourceReader for ExcludeTimes<S> {
    fn source_name(&self) -> &str {
        self.inner.source_name()
    }

    fn diagnostics(&self) -> RunDiagnostics {
        let mut diagnostics = self.inner.diagnostics();
        diagnostics.rows_filtered += self.filtered;
        diagnostics
    }
}

/// First activation of every concept outside the excluded baseline releases.
pub fn new_concept_report(sources: Rf2Sources, config: &TermDeltaConfig) -> TermDeltaResult<RunReport> {
    config.validate()?;
    let mut diagnostics = RunDiagnostics::default();

    let concepts = ExcludeTimes::new(sources.concepts, &config.rf2.excluded_creation_times);
    let concepts = load("concepts", concepts, &mut diagnostics)?;
    let fsn = load_index(FSN, Some(sources.descriptions), &mut diagnostics)?;

    let engine = ChangeEngine::builder()
        .relation(fsn)
        .labels(LabelSpec::new(FSN, TERM))
        .config(config.engine.clone())
        .build()?;

    let mut report = engine.run(&concepts, &TransitionPredicate::first_activation())?;
    report.diagnostics.merge(diagnostics);
    info!(new_concepts = report.records.len(), "new concept report ready");
    Ok(report)
}
