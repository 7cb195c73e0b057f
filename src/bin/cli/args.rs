//! CLI Argument Structures
//!
//! This module contains all CLI argument definitions, command structures,
//! and output enums used by the quizmatch binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use quizmatch_rs::{SimilarityAlgorithm, VERSION};

/// Quiz scoring and compatibility matching
#[derive(Parser)]
#[command(name = "quizmatch")]
#[command(version = VERSION)]
#[command(about = "Quizmatch - quiz scoring and compatibility matching")]
#[command(long_about = "
Score quiz answers into normalized trait vectors and compare those vectors
between people, across multi-quiz profiles, or within a group.

All inputs are JSON files. Results are printed as JSON by default.

Common Usage:

  # Normalized trait vector for one respondent
  quizmatch score --quiz quiz.json --answers answers.json

  # Match two vectors and explain the result trait by trait
  quizmatch match alice.json bob.json --breakdown --format table

  # Compare multi-quiz profiles on their shared aspects
  quizmatch aspects alice_profile.json bob_profile.json

  # Group insights for three or more participants
  quizmatch group team.json --labels labels.json --context communication
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Engine configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Turn answers into a trait vector
    Score(ScoreArgs),

    /// Match two trait vectors
    Match(MatchArgs),

    /// Match two multi-aspect profiles on their shared aspects
    Aspects(AspectsArgs),

    /// Group insights for three or more participants
    Group(GroupArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Validate the configuration file given with --config
    #[command(name = "validate-config")]
    ValidateConfig,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Human-readable table
    Table,
}

#[derive(Args)]
pub struct ScoreArgs {
    /// Quiz definition (JSON object with `questions`, or a bare question array)
    #[arg(short, long, value_name = "FILE")]
    pub quiz: PathBuf,

    /// Submitted answers (JSON array)
    #[arg(short, long, value_name = "FILE")]
    pub answers: PathBuf,

    /// Reject answers with unknown question or option ids
    #[arg(long)]
    pub strict: bool,

    /// Print raw accumulated scores instead of the normalized vector
    #[arg(long)]
    pub raw: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct MatchArgs {
    /// First trait vector (JSON object)
    #[arg(value_name = "VECTOR_A")]
    pub vector_a: PathBuf,

    /// Second trait vector (JSON object)
    #[arg(value_name = "VECTOR_B")]
    pub vector_b: PathBuf,

    /// Similarity algorithm (cosine, euclidean, absolute)
    #[arg(long)]
    pub algorithm: Option<SimilarityAlgorithm>,

    /// Per-trait weights (JSON object)
    #[arg(short, long, value_name = "FILE")]
    pub weights: Option<PathBuf>,

    /// Include the per-trait breakdown
    #[arg(short, long)]
    pub breakdown: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct AspectsArgs {
    /// First profile (JSON object of aspect id to trait vector)
    #[arg(value_name = "PROFILE_A")]
    pub profile_a: PathBuf,

    /// Second profile (JSON object of aspect id to trait vector)
    #[arg(value_name = "PROFILE_B")]
    pub profile_b: PathBuf,

    /// Per-aspect weights (JSON object)
    #[arg(short, long, value_name = "FILE")]
    pub weights: Option<PathBuf>,

    /// Similarity algorithm used within each aspect
    #[arg(long)]
    pub algorithm: Option<SimilarityAlgorithm>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct GroupArgs {
    /// Participant vectors (JSON object of participant id to trait vector)
    #[arg(value_name = "VECTORS")]
    pub vectors: PathBuf,

    /// Trait display labels (JSON object of trait id to label)
    #[arg(short, long, value_name = "FILE")]
    pub labels: Option<PathBuf>,

    /// Quiz context recorded in logs
    #[arg(long, default_value = "")]
    pub context: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}
