//! Pairwise trait vector similarity.
//!
//! Three interchangeable scores, all on a 0–100 scale where 100 means
//! identical on the traits either vector defines:
//!
//! - **Cosine**: directional agreement; insensitive to how intensely a user
//!   expresses traits overall.
//! - **Euclidean**: weighted distance relative to the largest possible
//!   distance in the unit hypercube.
//! - **Absolute**: one minus the mean absolute per-trait difference.
//!
//! Missing traits count as 0.0. Sums run over the sorted trait union so that
//! `score(a, b)` and `score(b, a)` are bit-for-bit equal.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::errors::{QuizMatchError, Result};
use crate::core::quiz::{clamp01, TraitVector};

/// Per-trait weights; traits not listed weigh 1.0.
pub type TraitWeights = IndexMap<String, f64>;

/// Similarity algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityAlgorithm {
    /// Weighted cosine similarity
    #[default]
    Cosine,
    /// Weighted euclidean distance, normalized by the maximum distance
    Euclidean,
    /// Unweighted mean absolute difference
    Absolute,
}

impl SimilarityAlgorithm {
    /// Every available algorithm
    pub const ALL: [SimilarityAlgorithm; 3] = [Self::Cosine, Self::Euclidean, Self::Absolute];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::Euclidean => "euclidean",
            Self::Absolute => "absolute",
        }
    }

    /// Whether per-trait weights affect this algorithm
    pub fn uses_weights(&self) -> bool {
        !matches!(self, Self::Absolute)
    }
}

impl fmt::Display for SimilarityAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimilarityAlgorithm {
    type Err = QuizMatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "euclidean" => Ok(Self::Euclidean),
            "absolute" => Ok(Self::Absolute),
            other => Err(QuizMatchError::invalid_input_field(
                format!("Unknown similarity algorithm '{other}' (expected cosine, euclidean or absolute)"),
                "algorithm",
            )),
        }
    }
}

/// One trait's values in both vectors and how close they are.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitComparison {
    /// Value in the first vector (0.0 if missing)
    pub a: f64,
    /// Value in the second vector (0.0 if missing)
    pub b: f64,
    /// `1 - |a - b|`, clamped to `[0, 1]`
    pub similarity: f64,
}

/// Explainable view of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityBreakdown {
    /// Headline score, 0–100
    pub overall: f64,
    /// Per-trait comparison, independent of the algorithm used for `overall`
    pub traits: IndexMap<String, TraitComparison>,
}

/// Match score plus per-trait breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Headline score, 0–100
    pub match_score: f64,
    /// Explainability data
    pub breakdown: SimilarityBreakdown,
}

/// Stateless scorer bound to one algorithm and weight set.
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    algorithm: SimilarityAlgorithm,
    weights: TraitWeights,
}

impl SimilarityEngine {
    /// Create an engine for `algorithm` with unit weights
    pub fn new(algorithm: SimilarityAlgorithm) -> Self {
        Self {
            algorithm,
            weights: TraitWeights::new(),
        }
    }

    /// Use per-trait weights (ignored by [`SimilarityAlgorithm::Absolute`])
    pub fn with_weights(mut self, weights: TraitWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Selected algorithm
    pub fn algorithm(&self) -> SimilarityAlgorithm {
        self.algorithm
    }

    /// Per-trait weights in use
    pub fn weights(&self) -> &TraitWeights {
        &self.weights
    }

    /// Score two vectors on the 0–100 scale.
    pub fn score(&self, a: &TraitVector, b: &TraitVector) -> Result<f64> {
        validate_vector(a, "vector_a")?;
        validate_vector(b, "vector_b")?;
        validate_weights(&self.weights, "weights")?;

        let score = self.score_unchecked(a, b);
        debug!(
            algorithm = %self.algorithm,
            traits_a = a.len(),
            traits_b = b.len(),
            score,
            "Computed match score"
        );
        Ok(score)
    }

    /// Score two vectors and explain the result trait by trait.
    pub fn score_with_breakdown(&self, a: &TraitVector, b: &TraitVector) -> Result<SimilarityResult> {
        let match_score = self.score(a, b)?;
        Ok(SimilarityResult {
            match_score,
            breakdown: SimilarityBreakdown {
                overall: match_score,
                traits: trait_breakdown(a, b),
            },
        })
    }

    pub(crate) fn score_unchecked(&self, a: &TraitVector, b: &TraitVector) -> f64 {
        let weights = Some(&self.weights).filter(|w| !w.is_empty());
        match self.algorithm {
            SimilarityAlgorithm::Cosine => cosine_score(a, b, weights),
            SimilarityAlgorithm::Euclidean => euclidean_score(a, b, weights),
            SimilarityAlgorithm::Absolute => absolute_score(a, b),
        }
    }
}

/// Trait names of both vectors, sorted.
fn sorted_union<'a>(a: &'a TraitVector, b: &'a TraitVector) -> BTreeSet<&'a str> {
    a.keys().chain(b.keys()).map(String::as_str).collect()
}

/// Trait names of `a` in order, then those only `b` has.
fn ordered_union<'a>(a: &'a TraitVector, b: &'a TraitVector) -> IndexSet<&'a str> {
    a.keys().chain(b.keys()).map(String::as_str).collect()
}

fn value(vector: &TraitVector, trait_name: &str) -> f64 {
    vector.get(trait_name).copied().unwrap_or(0.0)
}

fn weight(weights: Option<&TraitWeights>, trait_name: &str) -> f64 {
    weights
        .and_then(|w| w.get(trait_name))
        .copied()
        .unwrap_or(1.0)
}

/// Weighted cosine similarity scaled to 0–100.
///
/// Returns 0 when either vector has zero magnitude.
pub fn cosine_score(a: &TraitVector, b: &TraitVector, weights: Option<&TraitWeights>) -> f64 {
    let traits = sorted_union(a, b);
    if traits.is_empty() {
        return 0.0;
    }

    let (mut dot, mut mag_a_sq, mut mag_b_sq) = (0.0, 0.0, 0.0);
    for name in traits {
        let (x, y, w) = (value(a, name), value(b, name), weight(weights, name));
        dot += w * (x * y);
        mag_a_sq += w * (x * x);
        mag_b_sq += w * (y * y);
    }

    if mag_a_sq == 0.0 || mag_b_sq == 0.0 {
        return 0.0;
    }

    // One sqrt of the product keeps score(v, v) at exactly 100.
    100.0 * clamp01(dot / (mag_a_sq * mag_b_sq).sqrt())
}

/// Weighted euclidean similarity scaled to 0–100.
///
/// Returns 100 when the total weight is zero; there is nothing to differ on.
pub fn euclidean_score(a: &TraitVector, b: &TraitVector, weights: Option<&TraitWeights>) -> f64 {
    let traits = sorted_union(a, b);
    if traits.is_empty() {
        return 0.0;
    }

    let (mut squared, mut total_weight) = (0.0, 0.0);
    for name in traits {
        let w = weight(weights, name);
        let diff = value(a, name) - value(b, name);
        squared += w * diff * diff;
        total_weight += w;
    }

    let max_distance = total_weight.sqrt();
    if max_distance == 0.0 {
        return 100.0;
    }

    100.0 * clamp01(1.0 - squared.sqrt() / max_distance)
}

/// Mean absolute difference similarity scaled to 0–100. Unweighted.
pub fn absolute_score(a: &TraitVector, b: &TraitVector) -> f64 {
    let traits = sorted_union(a, b);
    if traits.is_empty() {
        return 0.0;
    }

    let count = traits.len() as f64;
    let total: f64 = traits
        .into_iter()
        .map(|name| (value(a, name) - value(b, name)).abs())
        .sum();

    100.0 * clamp01(1.0 - total / count)
}

/// Per-trait `1 - |a - b|` for every trait in either vector.
pub fn trait_breakdown(a: &TraitVector, b: &TraitVector) -> IndexMap<String, TraitComparison> {
    ordered_union(a, b)
        .into_iter()
        .map(|name| {
            let (x, y) = (value(a, name), value(b, name));
            let comparison = TraitComparison {
                a: x,
                b: y,
                similarity: clamp01(1.0 - (x - y).abs()),
            };
            (name.to_string(), comparison)
        })
        .collect()
}

pub(crate) fn validate_vector(vector: &TraitVector, field: &str) -> Result<()> {
    match vector.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, v)) => Err(QuizMatchError::invalid_input_field(
            format!("Trait '{name}' has non-finite value {v}"),
            field,
        )),
        None => Ok(()),
    }
}

pub(crate) fn validate_weights(weights: &IndexMap<String, f64>, field: &str) -> Result<()> {
    match weights.iter().find(|(_, w)| !w.is_finite() || **w < 0.0) {
        Some((name, w)) => Err(QuizMatchError::invalid_input_field(
            format!("Weight for '{name}' must be a non-negative number, got {w}"),
            field,
        )),
        None => Ok(()),
    }
}

/// Score two trait vectors (0–100) with optional per-trait weights.
pub fn compute_match(
    a: &TraitVector,
    b: &TraitVector,
    weights: Option<&TraitWeights>,
    algorithm: SimilarityAlgorithm,
) -> Result<f64> {
    SimilarityEngine::new(algorithm)
        .with_weights(weights.cloned().unwrap_or_default())
        .score(a, b)
}

/// Score two trait vectors and return the per-trait breakdown.
pub fn compute_match_with_breakdown(
    a: &TraitVector,
    b: &TraitVector,
    algorithm: SimilarityAlgorithm,
) -> Result<SimilarityResult> {
    SimilarityEngine::new(algorithm).score_with_breakdown(a, b)
}

#[cfg(test)]
#[path = "similarity_tests.rs"]
mod tests;
