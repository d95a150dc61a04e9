pub mod defaults;
pub mod engine_config;
pub mod rf2_config;

use serde::{Deserialize, Serialize};

use crate::errors::TermDeltaResult;

pub use engine_config::{EngineConfig, LabelPolicy};
pub use rf2_config::Rf2Config;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TermDeltaConfig {
    pub engine: EngineConfig,
    pub rf2: Rf2Config,
}

impl TermDeltaConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> TermDeltaResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that can never produce a meaningful run.
    pub fn validate(&self) -> TermDeltaResult<()> {
        self.engine.validate()?;
        self.rf2.validate()
    }
}
