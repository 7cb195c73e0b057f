//! Compatibility matching between trait vectors.
//!
//! - [`similarity`]: pairwise scores (cosine, euclidean, absolute) and breakdowns
//! - [`aspects`]: matching multi-quiz profiles on the aspects both share
//! - [`group`]: pairwise scores, trait spreads and insights for 3+ participants

pub mod aspects;
pub mod group;
pub mod similarity;

pub use aspects::{AspectMatchResult, AspectProfile, AspectWeights, PartialAspectMatcher};
pub use group::{
    calculate_group_insights, AlignmentTier, GroupInsightEngine, GroupInsightResult,
    GroupVectors, TraitLabels,
};
pub use similarity::{
    compute_match, compute_match_with_breakdown, SimilarityAlgorithm, SimilarityEngine,
    SimilarityResult, TraitWeights,
};
