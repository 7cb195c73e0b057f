//! Group-level compatibility statistics and insights.

use std::collections::BTreeSet;

use indexmap::IndexMap;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use tracing::debug;

use crate::core::config::{GroupConfig, MIN_GROUP_SIZE};
use crate::core::errors::{QuizMatchError, Result};
use crate::core::quiz::TraitVector;
use crate::matching::similarity::{cosine_score, validate_vector};

/// Participant id to trait vector.
pub type GroupVectors = IndexMap<String, TraitVector>;

/// Trait id to display label.
pub type TraitLabels = IndexMap<String, String>;

/// Cosine compatibility of one unordered pair of participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseMatch {
    /// First participant
    pub result_a: String,
    /// Second participant
    pub result_b: String,
    /// Score on the 0–1 scale
    pub match_score: f64,
    /// Score on the 0–100 scale
    pub match_score_percent: f64,
}

/// Spread of one trait across the group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitDistribution {
    /// Mean value
    pub mean: f64,
    /// Lowest value
    pub min: f64,
    /// Highest value
    pub max: f64,
    /// Population variance
    pub variance: f64,
}

impl TraitDistribution {
    /// Summarize a set of values; missing participants should already be 0.0.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: 0.0,
                min: 0.0,
                max: 0.0,
                variance: 0.0,
            };
        }

        let variance = if values.len() < 2 {
            0.0
        } else {
            Statistics::population_variance(values)
        };

        Self {
            mean: Statistics::mean(values),
            min: Statistics::min(values),
            max: Statistics::max(values),
            variance,
        }
    }
}

/// How closely a group matches on average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentTier {
    /// Average match at or above the high threshold
    High,
    /// Average match at or above the moderate threshold
    Moderate,
    /// Everything else
    Diverse,
}

impl AlignmentTier {
    /// Classify a 0–1 average match score
    pub fn from_average(average_match_score: f64, config: &GroupConfig) -> Self {
        if average_match_score >= config.high_alignment_threshold {
            Self::High
        } else if average_match_score >= config.moderate_alignment_threshold {
            Self::Moderate
        } else {
            Self::Diverse
        }
    }

    /// Human-readable insight line for this tier.
    ///
    /// Every tier carries the rounded average so the line reads the same
    /// whichever tier the group lands in.
    pub fn describe(&self, percent: i64) -> String {
        let summary = match self {
            Self::High => "high alignment",
            Self::Moderate => "moderate alignment",
            Self::Diverse => "diverse styles",
        };
        format!("Your group has {summary} ({percent}% average match)")
    }
}

/// Pairwise scores, trait spreads and generated insights for a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupInsightResult {
    /// Mean pairwise match on the 0–1 scale
    pub average_match_score: f64,
    /// Every unordered pair, in participant order
    pub pairwise_matches: Vec<PairwiseMatch>,
    /// Per-trait spread keyed by trait id
    pub trait_distributions: IndexMap<String, TraitDistribution>,
    /// Generated insight sentences
    pub insights: Vec<String>,
    /// Number of participants analyzed
    pub participant_count: usize,
    /// Tier behind the alignment insight
    pub alignment_tier: AlignmentTier,
}

/// Computes group insights for three or more participants.
#[derive(Debug, Clone, Default)]
pub struct GroupInsightEngine {
    config: GroupConfig,
}

impl GroupInsightEngine {
    /// Create an engine with custom thresholds
    pub fn new(config: GroupConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use
    pub fn config(&self) -> &GroupConfig {
        &self.config
    }

    /// Analyze a group.
    ///
    /// Distributions cover the labeled traits in label order; with no labels
    /// they cover every trait any participant has, sorted, labeled by id.
    /// `quiz_context` is only recorded in logs.
    pub fn calculate(
        &self,
        vectors: &GroupVectors,
        trait_labels: &TraitLabels,
        quiz_context: &str,
    ) -> Result<GroupInsightResult> {
        let minimum = self.config.min_participants.max(MIN_GROUP_SIZE);
        if vectors.len() < minimum {
            return Err(QuizMatchError::invalid_input_field(
                format!(
                    "Group insights need at least {minimum} participants, got {}",
                    vectors.len()
                ),
                "vectors",
            ));
        }
        for (participant, vector) in vectors {
            validate_vector(vector, &format!("vectors.{participant}"))?;
        }

        let pairwise_matches = pairwise_matches(vectors);
        let average_match_score = if pairwise_matches.is_empty() {
            0.0
        } else {
            pairwise_matches.iter().map(|m| m.match_score).sum::<f64>()
                / pairwise_matches.len() as f64
        };

        let labels = effective_labels(vectors, trait_labels);
        let trait_distributions: IndexMap<String, TraitDistribution> = labels
            .keys()
            .map(|trait_id| {
                let values: Vec<f64> = vectors
                    .values()
                    .map(|v| v.get(trait_id).copied().unwrap_or(0.0))
                    .collect();
                (trait_id.clone(), TraitDistribution::from_values(&values))
            })
            .collect();

        let alignment_tier = AlignmentTier::from_average(average_match_score, &self.config);
        let insights = self.insights(
            &trait_distributions,
            &labels,
            average_match_score,
            alignment_tier,
        );

        debug!(
            quiz_context,
            participants = vectors.len(),
            pairs = pairwise_matches.len(),
            traits = trait_distributions.len(),
            average_match_score,
            "Calculated group insights"
        );

        Ok(GroupInsightResult {
            average_match_score,
            pairwise_matches,
            trait_distributions,
            insights,
            participant_count: vectors.len(),
            alignment_tier,
        })
    }

    fn insights(
        &self,
        distributions: &IndexMap<String, TraitDistribution>,
        labels: &TraitLabels,
        average_match_score: f64,
        tier: AlignmentTier,
    ) -> Vec<String> {
        let mut insights = Vec::new();
        let label = |trait_id: &str| {
            labels
                .get(trait_id)
                .cloned()
                .unwrap_or_else(|| trait_id.to_string())
        };

        // Strict comparisons keep the first trait on ties.
        let mut most_aligned: Option<(&String, f64)> = None;
        let mut most_diverse: Option<(&String, f64)> = None;
        for (trait_id, distribution) in distributions {
            let variance = distribution.variance;
            if most_aligned.map_or(true, |(_, best)| variance < best) {
                most_aligned = Some((trait_id, variance));
            }
            if most_diverse.map_or(true, |(_, best)| variance > best) {
                most_diverse = Some((trait_id, variance));
            }
        }

        if let Some((trait_id, variance)) = most_aligned {
            if variance < self.config.aligned_variance_threshold {
                insights.push(format!(
                    "Your group is most aligned in {} (variance: {})",
                    label(trait_id),
                    round_to(variance, 2)
                ));
            }
        }

        if let Some((trait_id, variance)) = most_diverse {
            if variance > self.config.diverse_variance_threshold {
                insights.push(format!(
                    "Your group shows the most diversity in {}",
                    label(trait_id)
                ));
            }
        }

        let percent = (average_match_score * 100.0).round() as i64;
        insights.push(tier.describe(percent));

        insights
    }
}

fn pairwise_matches(vectors: &GroupVectors) -> Vec<PairwiseMatch> {
    let participants: Vec<(&String, &TraitVector)> = vectors.iter().collect();
    let pairs: Vec<(usize, usize)> = (0..participants.len())
        .flat_map(|i| ((i + 1)..participants.len()).map(move |j| (i, j)))
        .collect();

    let score_pair = |&(i, j): &(usize, usize)| {
        let (id_a, vector_a) = participants[i];
        let (id_b, vector_b) = participants[j];
        let percent = cosine_score(vector_a, vector_b, None);
        PairwiseMatch {
            result_a: id_a.clone(),
            result_b: id_b.clone(),
            match_score: percent / 100.0,
            match_score_percent: percent,
        }
    };

    #[cfg(feature = "parallel")]
    let matches = pairs.par_iter().map(score_pair).collect();
    #[cfg(not(feature = "parallel"))]
    let matches = pairs.iter().map(score_pair).collect();

    matches
}

fn effective_labels(vectors: &GroupVectors, trait_labels: &TraitLabels) -> TraitLabels {
    if !trait_labels.is_empty() {
        return trait_labels.clone();
    }

    vectors
        .values()
        .flat_map(|v| v.keys())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|id| (id.clone(), id.clone()))
        .collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Analyze a group with the default thresholds.
pub fn calculate_group_insights(
    vectors: &GroupVectors,
    trait_labels: &TraitLabels,
    quiz_context: &str,
) -> Result<GroupInsightResult> {
    GroupInsightEngine::default().calculate(vectors, trait_labels, quiz_context)
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;
