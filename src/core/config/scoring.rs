//! Scoring configuration types.

use serde::{Deserialize, Serialize};

use crate::core::errors::Result;
use crate::core::scoring::TraitVectorCalculator;

/// Trait vector calculation settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Reject answers with unknown question/option ids instead of skipping them
    #[serde(default)]
    pub strict: bool,
}

impl ScoringConfig {
    /// Validate scoring configuration
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Build the vector calculator described by this configuration
    pub fn calculator(&self) -> TraitVectorCalculator {
        TraitVectorCalculator::new().with_strict(self.strict)
    }
}
