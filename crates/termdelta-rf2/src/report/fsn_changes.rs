use serde::{Deserialize, Serialize};
use tracing::info;

use termdelta_core::config::TermDeltaConfig;
use termdelta_core::errors::TermDeltaResult;
use termdelta_core::models::{LabelChange, RunDiagnostics};
use termdelta_temporal::detect_label_changes;

use super::{load, load_index, Rf2Sources, FSN, TERM};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelChangeReport {
    pub changes: Vec<LabelChange>,
    pub diagnostics: RunDiagnostics,
}

/// Every FSN change of concepts that are active in their latest version.
pub fn fsn_change_report(sources: Rf2Sources, config: &TermDeltaConfig) -> TermDeltaResult<LabelChangeReport> {
    config.validate()?;
    let mut diagnostics = RunDiagnostics::default();

    let concepts = load("concepts", sources.concepts, &mut diagnostics)?;
    let fsn = load_index(FSN, Some(sources.descriptions), &mut diagnostics)?;

    let active = concepts.currently_active();
    let changes = detect_label_changes(&fsn, TERM, &active, config.engine.parallel);
    info!(
        active_concepts = active.len(),
        fsn_changes = changes.len(),
        "fsn change report ready"
    );
    Ok(LabelChangeReport {
        changes,
        diagnostics,
    })
}
