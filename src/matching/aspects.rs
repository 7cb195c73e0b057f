//! Partial, aspect-based matching of multi-quiz profiles.
//!
//! A profile can hold one trait vector per aspect (one per quiz taken). Two
//! profiles are compared only on the aspects both have answered; aspects
//! missing on either side are left out instead of counting as zero, so an
//! incomplete profile is not penalized.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::errors::Result;
use crate::core::quiz::TraitVector;
use crate::matching::similarity::{
    trait_breakdown, validate_vector, validate_weights, SimilarityEngine, TraitComparison,
};

/// Aspect id to that aspect's trait vector.
pub type AspectProfile = IndexMap<String, TraitVector>;

/// Aspect id to weight; unlisted aspects weigh 1.0.
pub type AspectWeights = IndexMap<String, f64>;

/// Explanation returned when two profiles share no aspect.
pub const NO_SHARED_ASPECTS: &str = "No shared aspects found";

/// Score and trait breakdown for one shared aspect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectMatch {
    /// Aspect score, 0–100
    pub match_score: f64,
    /// Per-trait comparison within the aspect
    pub traits: IndexMap<String, TraitComparison>,
}

/// Per-aspect detail behind an aspect match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectBreakdown {
    /// Weighted mean of the aspect scores, 0–100
    pub overall: f64,
    /// Shared aspects keyed by id
    pub aspects: IndexMap<String, AspectMatch>,
    /// Ids present in both profiles, in the first profile's order
    pub shared_aspects: Vec<String>,
    /// Why nothing was compared, when nothing was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of comparing two multi-aspect profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectMatchResult {
    /// Overall score, 0–100
    pub match_score: f64,
    /// Per-aspect explanation
    pub breakdown: AspectBreakdown,
}

impl AspectMatchResult {
    fn no_overlap() -> Self {
        Self {
            match_score: 0.0,
            breakdown: AspectBreakdown {
                overall: 0.0,
                aspects: IndexMap::new(),
                shared_aspects: Vec::new(),
                message: Some(NO_SHARED_ASPECTS.to_string()),
            },
        }
    }

    /// Whether any aspect was compared
    pub fn has_shared_aspects(&self) -> bool {
        !self.breakdown.shared_aspects.is_empty()
    }
}

/// Compares profiles aspect by aspect with a [`SimilarityEngine`].
#[derive(Debug, Clone, Default)]
pub struct PartialAspectMatcher {
    engine: SimilarityEngine,
    weights: AspectWeights,
}

impl PartialAspectMatcher {
    /// Create a matcher scoring each aspect with `engine`
    pub fn new(engine: SimilarityEngine) -> Self {
        Self {
            engine,
            weights: AspectWeights::new(),
        }
    }

    /// Weight aspects when averaging
    pub fn with_weights(mut self, weights: AspectWeights) -> Self {
        self.weights = weights;
        self
    }

    fn aspect_weight(&self, aspect_id: &str) -> f64 {
        self.weights.get(aspect_id).copied().unwrap_or(1.0)
    }

    /// Match two profiles on their shared aspects.
    ///
    /// The overall score is the weighted mean of the per-aspect scores. With
    /// no shared aspect the score is 0 and the breakdown carries a message.
    /// If every shared aspect weighs zero the overall score is 0 as well.
    pub fn match_profiles(&self, a: &AspectProfile, b: &AspectProfile) -> Result<AspectMatchResult> {
        validate_weights(&self.weights, "aspect_weights")?;
        validate_weights(self.engine.weights(), "weights")?;

        let shared: Vec<&String> = a.keys().filter(|id| b.contains_key(*id)).collect();
        if shared.is_empty() {
            debug!(
                aspects_a = a.len(),
                aspects_b = b.len(),
                "No shared aspects to match"
            );
            return Ok(AspectMatchResult::no_overlap());
        }

        let mut aspects = IndexMap::with_capacity(shared.len());
        let (mut weighted_sum, mut total_weight) = (0.0, 0.0);

        for aspect_id in &shared {
            let (vector_a, vector_b) = (&a[*aspect_id], &b[*aspect_id]);
            validate_vector(vector_a, &format!("aspects_a.{aspect_id}"))?;
            validate_vector(vector_b, &format!("aspects_b.{aspect_id}"))?;

            let match_score = self.engine.score_unchecked(vector_a, vector_b);
            let weight = self.aspect_weight(aspect_id);
            weighted_sum += weight * match_score;
            total_weight += weight;

            aspects.insert(
                (*aspect_id).clone(),
                AspectMatch {
                    match_score,
                    traits: trait_breakdown(vector_a, vector_b),
                },
            );
        }

        let overall = if total_weight > 0.0 {
            weighted_sum / total_weight
        } else {
            0.0
        };

        debug!(
            shared = shared.len(),
            algorithm = %self.engine.algorithm(),
            overall,
            "Matched partial aspects"
        );

        Ok(AspectMatchResult {
            match_score: overall,
            breakdown: AspectBreakdown {
                overall,
                aspects,
                shared_aspects: shared.into_iter().cloned().collect(),
                message: None,
            },
        })
    }
}
