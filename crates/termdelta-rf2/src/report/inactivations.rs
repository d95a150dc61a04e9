use tracing::info;

use termdelta_core::config::TermDeltaConfig;
use termdelta_core::errors::TermDeltaResult;
use termdelta_core::models::{RunDiagnostics, TransitionPredicate};
use termdelta_temporal::{AggregationSpec, AttributeSpec, ChangeEngine, LabelSpec, RunReport};

use super::{load, load_index, Rf2Sources, FSN, TERM};

/// Attribute name of the resolved inactivation reason.
pub const INACTIVATION_REASON: &str = "inactivation_reason";
/// Relation and aggregate name of the historical associations.
pub const ASSOCIATIONS: &str = "historical_associations";
const REASONS: &str = "inactivation_indicators";

/// First inactivation of every concept, with its FSN, the reason that applied
/// at that release, and every historical association active at that release.
pub fn inactivation_report(sources: Rf2Sources, config: &TermDeltaConfig) -> TermDeltaResult<RunReport> {
    config.validate()?;
    let mut diagnostics = RunDiagnostics::default();

    let concepts = load("concepts", sources.concepts, &mut diagnostics)?;
    let fsn = load_index(FSN, Some(sources.descriptions), &mut diagnostics)?;
    let reasons = load_index(REASONS, sources.inactivation_indicators, &mut diagnostics)?;
    let associations = load_index(ASSOCIATIONS, sources.associations, &mut diagnostics)?;

    let engine = ChangeEngine::builder()
        .relation(fsn)
        .relation(reasons)
        .relation(associations)
        .labels(LabelSpec::new(FSN, TERM))
        .attribute(AttributeSpec::new(INACTIVATION_REASON, REASONS, "valueId"))
        .aggregate(
            AggregationSpec::new(ASSOCIATIONS, ASSOCIATIONS, "targetComponentId")
                .with_kind("refsetId", Some(config.rf2.association_label_suffix.clone())),
        )
        .config(config.engine.clone())
        .build()?;

    let mut report = engine.run(&concepts, &TransitionPredicate::first_inactivation())?;
    report.diagnostics.merge(diagnostics);
    info!(
        inactivations = report.records.len(),
        rows_skipped = report.diagnostics.rows_skipped(),
        "inactivation report ready"
    );
    Ok(report)
}
