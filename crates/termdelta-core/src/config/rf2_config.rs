//! RF2 release conventions: type ids, refset ids and label clean-up.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{TermDeltaError, TermDeltaResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Rf2Config {
    pub fsn_type_id: String,
    pub inactivation_refset_id: String,
    pub historical_refset_ids: Vec<String>,
    /// Stripped from association refset labels before rendering.
    pub association_label_suffix: String,
    /// Concept rows at these effective times are ignored by the new-concept report.
    pub excluded_creation_times: Vec<u32>,
}

impl Default for Rf2Config {
    fn default() -> Self {
        Self {
            fsn_type_id: defaults::FSN_TYPE_ID.to_string(),
            inactivation_refset_id: defaults::CONCEPT_INACTIVATION_REFSET_ID.to_string(),
            historical_refset_ids: defaults::HISTORICAL_ASSOCIATION_REFSET_IDS
                .iter()
                .map(|id| id.to_string())
                .collect(),
            association_label_suffix: defaults::ASSOCIATION_LABEL_SUFFIX.to_string(),
            excluded_creation_times: vec![defaults::INITIAL_RELEASE_TIME],
        }
    }
}

impl Rf2Config {
    pub fn validate(&self) -> TermDeltaResult<()> {
        if self.fsn_type_id.is_empty() {
            return Err(TermDeltaError::Config("rf2.fsn_type_id must not be empty".to_string()));
        }
        if self.inactivation_refset_id.is_empty() {
            return Err(TermDeltaError::Config(
                "rf2.inactivation_refset_id must not be empty".to_string(),
            ));
        }
        if self.historical_refset_ids.is_empty() {
            return Err(TermDeltaError::Config(
                "rf2.historical_refset_ids must list at least one refset".to_string(),
            ));
        }
        Ok(())
    }
}
