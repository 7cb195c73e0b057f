//! Pairwise and aspect matching configuration types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::config::validation::validate_weight_map;
use crate::core::errors::Result;
use crate::matching::similarity::{SimilarityAlgorithm, TraitWeights};

/// Matching configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Algorithm used when the caller does not pick one
    #[serde(default)]
    pub algorithm: SimilarityAlgorithm,

    /// Per-trait weights for cosine and euclidean scoring; unlisted traits weigh 1.0
    #[serde(default)]
    pub trait_weights: TraitWeights,

    /// Per-aspect weights for partial matching; unlisted aspects weigh 1.0
    #[serde(default)]
    pub aspect_weights: IndexMap<String, f64>,
}

impl MatchingConfig {
    /// Validate matching configuration
    pub fn validate(&self) -> Result<()> {
        validate_weight_map(&self.trait_weights, "matching.trait_weights")?;
        validate_weight_map(&self.aspect_weights, "matching.aspect_weights")?;
        Ok(())
    }
}
