//! Configuration types and management for quizmatch-rs.
//!
//! The engine itself is configuration-free pure math; this module holds the
//! defaults a deployment wants to tune (strict scoring, default algorithm and
//! weights, group insight thresholds) in one YAML document.

pub mod group;
pub mod matching;
pub mod scoring;
pub mod validation;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, ResultExt};

// Re-export types from submodules
pub use group::{GroupConfig, MIN_GROUP_SIZE};
pub use matching::MatchingConfig;
pub use scoring::ScoringConfig;
pub use validation::{
    validate_min_usize, validate_non_negative, validate_unit_range, validate_weight_map,
};

/// Main configuration for the quizmatch engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizMatchConfig {
    /// Trait vector calculation settings
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Pairwise and aspect matching defaults
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Group insight thresholds
    #[serde(default)]
    pub group: GroupConfig,
}

impl QuizMatchConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(Into::into)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_yaml_str(&content)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.matching.validate()?;
        self.group.validate()?;
        Ok(())
    }
}
