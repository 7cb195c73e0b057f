//! Command execution for the quizmatch CLI.
//!
//! Every command reads JSON inputs with `tokio::fs`, runs one engine
//! operation and prints the result as pretty JSON or as rounded tables.

use std::path::Path;

use anyhow::Context;
use owo_colors::OwoColorize;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tabled::{settings::Style as TableStyle, Table, Tabled};
use tracing::{debug, info, warn};

use quizmatch_rs::core::quiz::Question;
use quizmatch_rs::matching::similarity::TraitComparison;
use quizmatch_rs::matching::{
    AspectMatchResult, AspectProfile, AspectWeights, GroupInsightResult, GroupVectors,
    SimilarityEngine, TraitLabels, TraitWeights,
};
use quizmatch_rs::{Answer, QuizDefinition, QuizMatchConfig, QuizMatchEngine, TraitVector};

use crate::cli::args::{AspectsArgs, GroupArgs, MatchArgs, OutputFormat, ScoreArgs};

/// Quiz files may hold a full definition or just the question list.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuizInput {
    Questions(Vec<Question>),
    Definition(QuizDefinition),
}

impl From<QuizInput> for QuizDefinition {
    fn from(input: QuizInput) -> Self {
        match input {
            QuizInput::Questions(questions) => QuizDefinition::new(questions),
            QuizInput::Definition(quiz) => quiz,
        }
    }
}

/// Load configuration from a YAML file, or the defaults
pub async fn load_configuration(path: Option<&Path>) -> anyhow::Result<QuizMatchConfig> {
    let Some(path) = path else {
        return Ok(QuizMatchConfig::default());
    };

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = QuizMatchConfig::from_yaml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

async fn load_engine(path: Option<&Path>) -> anyhow::Result<QuizMatchEngine> {
    let config = load_configuration(path).await?;
    Ok(QuizMatchEngine::new(config)?)
}

async fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {what}: {}", path.display()))?;
    let value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {what}: {}", path.display()))?;

    debug!(path = %path.display(), what, "Loaded input");
    Ok(value)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_table<R: Tabled>(rows: Vec<R>) {
    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{table}");
}

/// Row type for trait vector tables.
#[derive(Tabled)]
struct TraitRow {
    #[tabled(rename = "Trait")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Row type for per-trait breakdown tables.
#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Trait")]
    name: String,
    #[tabled(rename = "A")]
    a: String,
    #[tabled(rename = "B")]
    b: String,
    #[tabled(rename = "Similarity")]
    similarity: String,
}

fn print_vector_table(vector: &TraitVector) {
    let rows = vector
        .iter()
        .map(|(name, value)| TraitRow {
            name: name.clone(),
            value: format!("{value:.4}"),
        })
        .collect();
    print_table::<TraitRow>(rows);
}

fn print_comparison_table<'a>(
    traits: impl IntoIterator<Item = (&'a String, &'a TraitComparison)>,
) {
    let rows = traits
        .into_iter()
        .map(|(name, comparison)| ComparisonRow {
            name: name.clone(),
            a: format!("{:.3}", comparison.a),
            b: format!("{:.3}", comparison.b),
            similarity: format!("{:.3}", comparison.similarity),
        })
        .collect();
    print_table::<ComparisonRow>(rows);
}

fn score_line(label: &str, score: f64) -> String {
    let formatted = format!("{score:.1}");
    let colored = if score >= 75.0 {
        formatted.bright_green().bold().to_string()
    } else if score >= 60.0 {
        formatted.yellow().bold().to_string()
    } else {
        formatted.red().bold().to_string()
    };
    format!("{} {colored}", label.bright_blue().bold())
}

/// Turn answers into a trait vector
pub async fn score_command(args: ScoreArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let mut config = load_configuration(config).await?;
    if args.strict {
        config.scoring.strict = true;
    }
    let engine = QuizMatchEngine::new(config)?;

    let quiz: QuizDefinition = read_json::<QuizInput>(&args.quiz, "quiz").await?.into();
    let answers: Vec<Answer> = read_json(&args.answers, "answers").await?;

    let vector = if args.raw {
        engine.raw_scores(&answers, &quiz)?
    } else {
        engine.calculate_trait_vector(&answers, &quiz)?
    };

    match args.format {
        OutputFormat::Json => print_json(&vector)?,
        OutputFormat::Table => print_vector_table(&vector),
    }

    Ok(())
}

/// Match two trait vectors
pub async fn match_command(args: MatchArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let config = load_configuration(config).await?;
    config.validate()?;

    let vector_a: TraitVector = read_json(&args.vector_a, "vector").await?;
    let vector_b: TraitVector = read_json(&args.vector_b, "vector").await?;
    let weights: TraitWeights = match &args.weights {
        Some(path) => read_json(path, "trait weights").await?,
        None => config.matching.trait_weights.clone(),
    };

    let algorithm = args.algorithm.unwrap_or(config.matching.algorithm);
    if !weights.is_empty() && !algorithm.uses_weights() {
        warn!(%algorithm, "Trait weights are ignored by this algorithm");
    }
    let scorer = SimilarityEngine::new(algorithm).with_weights(weights);

    if !args.breakdown {
        let match_score = scorer.score(&vector_a, &vector_b)?;
        match args.format {
            OutputFormat::Json => print_json(&serde_json::json!({
                "algorithm": algorithm,
                "match_score": match_score,
            }))?,
            OutputFormat::Table => println!("{}", score_line("Match score:", match_score)),
        }
        return Ok(());
    }

    let result = scorer.score_with_breakdown(&vector_a, &vector_b)?;
    match args.format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => {
            println!("{}", score_line("Match score:", result.match_score));
            println!();
            print_comparison_table(&result.breakdown.traits);
        }
    }

    Ok(())
}

/// Match two multi-aspect profiles
pub async fn aspects_command(args: AspectsArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let engine = load_engine(config).await?;

    let profile_a: AspectProfile = read_json(&args.profile_a, "profile").await?;
    let profile_b: AspectProfile = read_json(&args.profile_b, "profile").await?;
    let weights: Option<AspectWeights> = match &args.weights {
        Some(path) => Some(read_json(path, "aspect weights").await?),
        None => None,
    };

    let result =
        engine.match_partial_aspects(&profile_a, &profile_b, weights.as_ref(), args.algorithm)?;

    match args.format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => print_aspects_table(&result),
    }

    Ok(())
}

/// Row type for aspect tables.
#[derive(Tabled)]
struct AspectRow {
    #[tabled(rename = "Aspect")]
    aspect: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Traits")]
    traits: usize,
}

fn print_aspects_table(result: &AspectMatchResult) {
    println!("{}", score_line("Overall match:", result.match_score));

    if !result.has_shared_aspects() {
        if let Some(message) = &result.breakdown.message {
            println!("{}", message.dimmed());
        }
        return;
    }

    println!();
    let rows = result
        .breakdown
        .aspects
        .iter()
        .map(|(aspect, detail)| AspectRow {
            aspect: aspect.clone(),
            score: format!("{:.1}", detail.match_score),
            traits: detail.traits.len(),
        })
        .collect();
    print_table::<AspectRow>(rows);
}

/// Group insights for three or more participants
pub async fn group_command(args: GroupArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let engine = load_engine(config).await?;

    let vectors: GroupVectors = read_json(&args.vectors, "group vectors").await?;
    let labels: TraitLabels = match &args.labels {
        Some(path) => read_json(path, "trait labels").await?,
        None => TraitLabels::new(),
    };

    let result = engine.calculate_group_insights(&vectors, &labels, &args.context)?;

    match args.format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => print_group_tables(&result, &labels),
    }

    Ok(())
}

/// Row type for pairwise match tables.
#[derive(Tabled)]
struct PairRow {
    #[tabled(rename = "A")]
    a: String,
    #[tabled(rename = "B")]
    b: String,
    #[tabled(rename = "Match %")]
    percent: String,
}

/// Row type for trait distribution tables.
#[derive(Tabled)]
struct DistributionRow {
    #[tabled(rename = "Trait")]
    name: String,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "Variance")]
    variance: String,
}

fn print_group_tables(result: &GroupInsightResult, labels: &TraitLabels) {
    println!(
        "{}",
        score_line("Average match:", result.average_match_score * 100.0)
    );
    println!();

    let pairs = result
        .pairwise_matches
        .iter()
        .map(|pair| PairRow {
            a: pair.result_a.clone(),
            b: pair.result_b.clone(),
            percent: format!("{:.1}", pair.match_score_percent),
        })
        .collect();
    print_table::<PairRow>(pairs);
    println!();

    let distributions = result
        .trait_distributions
        .iter()
        .map(|(trait_id, d)| DistributionRow {
            name: labels.get(trait_id).unwrap_or(trait_id).clone(),
            mean: format!("{:.3}", d.mean),
            min: format!("{:.3}", d.min),
            max: format!("{:.3}", d.max),
            variance: format!("{:.3}", d.variance),
        })
        .collect();
    print_table::<DistributionRow>(distributions);
    println!();

    println!("{}", "Insights:".bright_blue().bold());
    for insight in &result.insights {
        println!("  • {insight}");
    }
}

/// Print default configuration in YAML format
pub async fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default quizmatch configuration".dimmed());
    println!(
        "{}",
        "# Save this to a file and customize as needed".dimmed()
    );
    println!(
        "{}",
        "# Usage: quizmatch --config your-config.yml match a.json b.json".dimmed()
    );
    println!();

    let yaml_output = serde_yaml::to_string(&QuizMatchConfig::default())?;
    println!("{yaml_output}");

    Ok(())
}

/// Row type for the configuration summary table.
#[derive(Tabled)]
struct SettingRow {
    #[tabled(rename = "Setting")]
    setting: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Validate the configuration file passed with --config
pub async fn validate_config(config: Option<&Path>) -> anyhow::Result<()> {
    let path = config.context("validate-config needs a file: pass --config <PATH>")?;

    println!(
        "{} {}",
        "Validating configuration:".bright_blue().bold(),
        path.display().to_string().cyan()
    );

    let config = match load_configuration(Some(path))
        .await
        .and_then(|config| config.validate().map(|()| config).map_err(Into::into))
    {
        Ok(config) => {
            println!("{}", "Configuration file is valid!".bright_green().bold());
            println!();
            config
        }
        Err(e) => {
            eprintln!("{} {:#}", "Configuration validation failed:".red(), e);
            eprintln!(
                "{}",
                "Tip: Use 'quizmatch print-default-config' to see valid format".dimmed()
            );
            return Err(e);
        }
    };

    let group = &config.group;
    let rows = vec![
        SettingRow {
            setting: "scoring.strict".to_string(),
            value: config.scoring.strict.to_string(),
        },
        SettingRow {
            setting: "matching.algorithm".to_string(),
            value: config.matching.algorithm.to_string(),
        },
        SettingRow {
            setting: "matching.trait_weights".to_string(),
            value: format!("{} traits", config.matching.trait_weights.len()),
        },
        SettingRow {
            setting: "matching.aspect_weights".to_string(),
            value: format!("{} aspects", config.matching.aspect_weights.len()),
        },
        SettingRow {
            setting: "group.min_participants".to_string(),
            value: group.min_participants.to_string(),
        },
        SettingRow {
            setting: "group.high_alignment_threshold".to_string(),
            value: group.high_alignment_threshold.to_string(),
        },
        SettingRow {
            setting: "group.moderate_alignment_threshold".to_string(),
            value: group.moderate_alignment_threshold.to_string(),
        },
    ];
    print_table(rows);

    Ok(())
}
