//! Temporal engine configuration.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{TermDeltaError, TermDeltaResult};

/// Which label version an event record shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// The most recent active label, whatever the event time.
    #[default]
    LatestActive,
    /// The label that was active at the event time.
    AsOfEvent,
}

/// Configuration for the temporal engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub label_policy: LabelPolicy,

    /// Fan per-entity work out over rayon.
    pub parallel: bool,
    /// Dedicated pool size. `None` uses the global rayon pool.
    pub threads: Option<usize>,

    // Sentinels for lookups that find nothing
    pub default_attribute_value: String,
    pub default_attribute_label: String,
    pub missing_label: String,

    /// Collapse each related component to its latest version before
    /// aggregating, so retracted links disappear.
    pub latest_per_component: bool,
    pub relation_separator: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            label_policy: LabelPolicy::default(),
            parallel: true,
            threads: None,
            default_attribute_value: defaults::DEFAULT_ATTRIBUTE_VALUE.to_string(),
            default_attribute_label: defaults::DEFAULT_ATTRIBUTE_LABEL.to_string(),
            missing_label: defaults::DEFAULT_MISSING_LABEL.to_string(),
            latest_per_component: false,
            relation_separator: defaults::DEFAULT_RELATION_SEPARATOR.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> TermDeltaResult<()> {
        if self.threads == Some(0) {
            return Err(TermDeltaError::Config(
                "engine.threads must be at least 1 (omit it to use the global pool)".to_string(),
            ));
        }
        if self.default_attribute_value.is_empty() {
            return Err(TermDeltaError::Config(
                "engine.default_attribute_value must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
