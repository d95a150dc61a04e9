//! Release change reports.

mod fsn_changes;
mod inactivations;
mod new_concepts;
mod tally;

pub use fsn_changes::{fsn_change_report, LabelChangeReport};
pub use inactivations::{inactivation_report, ASSOCIATIONS, INACTIVATION_REASON};
pub use new_concepts::{new_concept_report, ExcludeTimes};
pub use tally::{tally, TallyBy, TallyRow};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use termdelta_core::config::Rf2Config;
use termdelta_core::errors::SourceError;
use termdelta_core::models::RunDiagnostics;
use termdelta_core::traits::SourceReader;
use termdelta_temporal::{RelationIndex, TimelineBuilder, TimelineSet};

use crate::reader::{Rf2Mapping, Rf2Reader};

/// Relation name of the FSN label index.
pub const FSN: &str = "fsn";
/// Payload field holding the FSN text.
pub const TERM: &str = "term";

/// Release files feeding the reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rf2Paths {
    pub concepts: PathBuf,
    pub descriptions: PathBuf,
    pub inactivation_indicators: Option<PathBuf>,
    pub associations: Option<PathBuf>,
}

/// Row sources for one release. The refset sources are only read by the
/// inactivation report; when absent, every reason defaults and no
/// associations are listed.
pub struct Rf2Sources {
    pub concepts: Box<dyn SourceReader>,
    pub descriptions: Box<dyn SourceReader>,
    pub inactivation_indicators: Option<Box<dyn SourceReader>>,
    pub associations: Option<Box<dyn SourceReader>>,
}

impl Rf2Sources {
    /// Open every file with its RF2 mapping.
    pub fn open(paths: &Rf2Paths, config: &Rf2Config) -> Result<Self, SourceError> {
        let boxed = |path: &PathBuf, mapping: Rf2Mapping| -> Result<Box<dyn SourceReader>, SourceError> {
            Ok(Box::new(Rf2Reader::open(path, &mapping)?))
        };
        Ok(Self {
            concepts: boxed(&paths.concepts, Rf2Mapping::concepts())?,
            descriptions: boxed(&paths.descriptions, Rf2Mapping::fsn_descriptions(config))?,
            inactivation_indicators: paths
                .inactivation_indicators
                .as_ref()
                .map(|p| boxed(p, Rf2Mapping::inactivation_indicators(config)))
                .transpose()?,
            associations: paths
                .associations
                .as_ref()
                .map(|p| boxed(p, Rf2Mapping::historical_associations(config)))
                .transpose()?,
        })
    }
}

/// Drain `source` into timelines, folding its counts into `diagnostics`.
fn load<S: SourceReader>(
    name: &str,
    source: S,
    diagnostics: &mut RunDiagnostics,
) -> Result<TimelineSet, SourceError> {
    let mut builder = TimelineBuilder::new(name);
    builder.ingest(source)?;
    let (timelines, counts) = builder.finish();
    diagnostics.merge(counts);
    Ok(timelines)
}

fn load_index<S: SourceReader>(
    name: &str,
    source: Option<S>,
    diagnostics: &mut RunDiagnostics,
) -> Result<RelationIndex, SourceError> {
    let timelines = match source {
        Some(source) => load(name, source, diagnostics)?,
        None => TimelineSet::new(),
    };
    Ok(RelationIndex::new(name, timelines))
}
