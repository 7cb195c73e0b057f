//! Quiz scoring: trait ranges and normalized trait vectors.
//!
//! This module provides:
//! - Per-trait min/max range derivation from a quiz definition
//! - Raw score accumulation from answers
//! - Min-max normalization into `[0, 1]` trait vectors

pub mod ranges;
pub mod vector;

// Re-export main types
pub use ranges::{calculate_trait_ranges, TraitRangeCalculator};
pub use vector::{calculate_trait_vector, normalize, TraitVectorCalculator};
