//! Main quizmatch engine implementation.
//!
//! [`QuizMatchEngine`] bundles a validated [`QuizMatchConfig`] with the five
//! boundary operations callers need: trait vector calculation, pairwise
//! matching with and without breakdown, partial aspect matching and group
//! insights. It holds no per-call state; clones share the configuration.

use std::sync::Arc;

use tracing::info;

use crate::core::config::QuizMatchConfig;
use crate::core::errors::Result;
use crate::core::quiz::{Answer, QuizDefinition, TraitRanges, TraitVector};
use crate::core::scoring::TraitRangeCalculator;
use crate::matching::aspects::{AspectMatchResult, AspectProfile, AspectWeights, PartialAspectMatcher};
use crate::matching::group::{GroupInsightEngine, GroupInsightResult, GroupVectors, TraitLabels};
use crate::matching::similarity::{
    SimilarityAlgorithm, SimilarityEngine, SimilarityResult, TraitWeights,
};

/// Main quizmatch engine
#[derive(Debug, Clone)]
pub struct QuizMatchEngine {
    /// Engine configuration
    config: Arc<QuizMatchConfig>,
}

impl Default for QuizMatchEngine {
    fn default() -> Self {
        Self {
            config: Arc::new(QuizMatchConfig::default()),
        }
    }
}

impl QuizMatchEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: QuizMatchConfig) -> Result<Self> {
        config.validate()?;

        info!(
            strict = config.scoring.strict,
            algorithm = %config.matching.algorithm,
            "Initialized quizmatch engine"
        );

        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &QuizMatchConfig {
        &self.config
    }

    fn similarity_engine(
        &self,
        algorithm: Option<SimilarityAlgorithm>,
        weights: Option<&TraitWeights>,
    ) -> SimilarityEngine {
        let matching = &self.config.matching;
        SimilarityEngine::new(algorithm.unwrap_or(matching.algorithm))
            .with_weights(weights.unwrap_or(&matching.trait_weights).clone())
    }

    /// Normalized trait vector for a set of answers
    pub fn calculate_trait_vector(
        &self,
        answers: &[Answer],
        quiz: &QuizDefinition,
    ) -> Result<TraitVector> {
        self.config.scoring.calculator().calculate(answers, quiz)
    }

    /// Raw, unnormalized trait totals for a set of answers
    pub fn raw_scores(&self, answers: &[Answer], quiz: &QuizDefinition) -> Result<TraitVector> {
        self.config.scoring.calculator().raw_scores(answers, quiz)
    }

    /// Achievable per-trait ranges of a quiz
    pub fn trait_ranges(&self, quiz: &QuizDefinition) -> TraitRanges {
        TraitRangeCalculator::new().calculate(quiz)
    }

    /// Match score (0–100) between two vectors.
    ///
    /// `weights` and `algorithm` fall back to the configured defaults.
    pub fn compute_match(
        &self,
        a: &TraitVector,
        b: &TraitVector,
        weights: Option<&TraitWeights>,
        algorithm: Option<SimilarityAlgorithm>,
    ) -> Result<f64> {
        self.similarity_engine(algorithm, weights).score(a, b)
    }

    /// Match score plus per-trait breakdown
    pub fn compute_match_with_breakdown(
        &self,
        a: &TraitVector,
        b: &TraitVector,
        algorithm: Option<SimilarityAlgorithm>,
    ) -> Result<SimilarityResult> {
        self.similarity_engine(algorithm, None)
            .score_with_breakdown(a, b)
    }

    /// Compare multi-aspect profiles on the aspects both share
    pub fn match_partial_aspects(
        &self,
        a: &AspectProfile,
        b: &AspectProfile,
        weights: Option<&AspectWeights>,
        algorithm: Option<SimilarityAlgorithm>,
    ) -> Result<AspectMatchResult> {
        let weights = weights
            .unwrap_or(&self.config.matching.aspect_weights)
            .clone();
        PartialAspectMatcher::new(self.similarity_engine(algorithm, None))
            .with_weights(weights)
            .match_profiles(a, b)
    }

    /// Pairwise scores, trait distributions and insights for 3+ participants
    pub fn calculate_group_insights(
        &self,
        vectors: &GroupVectors,
        trait_labels: &TraitLabels,
        quiz_context: &str,
    ) -> Result<GroupInsightResult> {
        GroupInsightEngine::new(self.config.group.clone()).calculate(
            vectors,
            trait_labels,
            quiz_context,
        )
    }
}
