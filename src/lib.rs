//! # Quizmatch-RS: Quiz Scoring & Compatibility Matching
//!
//! Turns answers to weighted personality-style quizzes into normalized trait
//! vectors and compares those vectors between people. This library provides:
//!
//! - **Trait Scoring**: per-trait achievable ranges and min-max normalized vectors
//! - **Pairwise Matching**: cosine, euclidean and absolute similarity on a 0–100 scale
//! - **Explainability**: per-trait breakdowns behind every match
//! - **Partial Matching**: comparing multi-quiz profiles on their shared aspects
//! - **Group Insights**: pairwise scores, trait distributions and alignment summaries
//!
//! Every operation is a pure, deterministic function of its inputs. Trait
//! names are data: vectors are string-keyed, insertion-ordered maps.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 API Layer (QuizMatchEngine)          │
//! ├──────────────────────────────────────────────────────┤
//! │  Core                     │  Matching                │
//! │ • Quiz model              │ • Similarity             │
//! │ • Ranges & vectors        │ • Partial aspects        │
//! │ • Config & errors         │ • Group insights         │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use quizmatch_rs::{Answer, Question, QuizDefinition, QuizMatchEngine};
//!
//! let quiz = QuizDefinition::new(vec![
//!     Question::new("q1")
//!         .with_option("a", [("directness", 2.0)])
//!         .with_option("b", [("empathy", 2.0)]),
//! ]);
//!
//! let engine = QuizMatchEngine::default();
//! let alice = engine.calculate_trait_vector(&[Answer::new("q1", "a")], &quiz)?;
//! let bob = engine.calculate_trait_vector(&[Answer::new("q1", "b")], &quiz)?;
//!
//! let score = engine.compute_match(&alice, &bob, None, None)?;
//! assert_eq!(score, 0.0);
//! # Ok::<(), quizmatch_rs::QuizMatchError>(())
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core scoring modules
pub mod core {
    //! Quiz model, trait scoring, configuration and errors.

    pub mod config;
    pub mod errors;
    pub mod quiz;
    pub mod scoring;
}

// Vector comparison
pub mod matching;

// Public API and engine interface
pub mod api {
    //! High-level API and engine interface.

    pub mod engine;
}

// Re-export primary types for convenience
pub use crate::api::engine::QuizMatchEngine;
pub use crate::core::config::QuizMatchConfig;
pub use crate::core::errors::{QuizMatchError, Result, ResultExt};
pub use crate::core::quiz::{
    Answer, Question, QuizDefinition, TraitMap, TraitRange, TraitRanges, TraitVector,
};
pub use crate::core::scoring::{calculate_trait_ranges, calculate_trait_vector};
pub use crate::matching::{
    calculate_group_insights, compute_match, compute_match_with_breakdown, SimilarityAlgorithm,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
