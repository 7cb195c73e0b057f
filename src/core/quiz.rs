//! Quiz definitions, answers and trait vectors.
//!
//! Trait names are data, not schema: vectors and per-option contributions are
//! string-keyed maps. `IndexMap` keeps insertion order so that results come
//! back in the order traits were first declared, and so tie-breaks stay
//! deterministic across runs.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::core::errors::{QuizMatchError, Result};

/// Mapping from trait name to value (raw or normalized).
pub type TraitVector = IndexMap<String, f64>;

/// Per-option contributions: trait name to raw contribution.
pub type TraitContributions = IndexMap<String, f64>;

/// Mapping from option id to the contributions selecting it makes.
pub type TraitMap = IndexMap<String, TraitContributions>;

/// Per-trait achievable score ranges for a quiz.
pub type TraitRanges = IndexMap<String, TraitRange>;

/// Minimum and maximum raw score achievable for one trait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitRange {
    /// Lowest achievable raw score
    pub min: f64,
    /// Highest achievable raw score
    pub max: f64,
}

impl TraitRange {
    /// Range assumed for traits that no question declares.
    pub const UNIT: TraitRange = TraitRange { min: 0.0, max: 1.0 };

    /// Create a new range
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A flat range carries no information; values normalize to the midpoint.
    pub fn is_flat(&self) -> bool {
        self.max <= self.min
    }

    /// Min-max normalize `value` into `[0, 1]`.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_flat() {
            return 0.5;
        }
        clamp01((value - self.min) / (self.max - self.min))
    }
}

impl Default for TraitRange {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Clamp to the unit interval, mapping NaN to 0.
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// One weighted multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Question identifier
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Multiplier applied to every contribution of this question
    #[serde(default = "Question::default_weight")]
    pub weight: f64,

    /// Option id to trait contributions
    #[serde(default, deserialize_with = "deserialize_trait_map")]
    pub trait_map: TraitMap,
}

impl Question {
    /// Create a question with the default weight and no options
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            weight: Self::default_weight(),
            trait_map: TraitMap::new(),
        }
    }

    fn default_weight() -> f64 {
        1.0
    }

    /// Set the question weight
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Add an option and its trait contributions
    pub fn with_option<I, K>(mut self, option_id: impl Into<String>, contributions: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let contributions = contributions
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        self.trait_map.insert(option_id.into(), contributions);
        self
    }

    /// Contributions for an option, if the question offers it
    pub fn option(&self, option_id: &str) -> Option<&TraitContributions> {
        self.trait_map.get(option_id)
    }
}

/// A quiz: the ordered list of questions it asks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizDefinition {
    /// Questions in presentation order
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuizDefinition {
    /// Create a quiz from its questions
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Parse a quiz definition from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// First question with the given id
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Check structural integrity of the quiz.
    ///
    /// Scoring never calls this; it is for content pipelines that want to
    /// reject bad quizzes before they reach users.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(QuizMatchError::validation_field(
                    format!("Duplicate question id '{}'", question.id),
                    "questions.id",
                ));
            }

            if !question.weight.is_finite() || question.weight < 0.0 {
                return Err(QuizMatchError::validation_field(
                    format!(
                        "Question '{}' has invalid weight {}",
                        question.id, question.weight
                    ),
                    format!("questions.{}.weight", question.id),
                ));
            }

            for (option_id, contributions) in &question.trait_map {
                for (trait_name, value) in contributions {
                    if !value.is_finite() {
                        return Err(QuizMatchError::validation_field(
                            format!("Contribution to '{trait_name}' is not a finite number"),
                            format!("questions.{}.trait_map.{option_id}", question.id),
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

/// One submitted answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Question being answered
    #[serde(deserialize_with = "deserialize_id")]
    pub question_id: String,

    /// Option picked
    #[serde(deserialize_with = "deserialize_id")]
    pub option_id: String,

    /// Explicit numeric value; accepted but not used for scoring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Answer {
    /// Create an answer without an explicit value
    pub fn new(question_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            option_id: option_id.into(),
            value: None,
        }
    }
}

/// Ids arrive as strings or as bare JSON numbers from numeric-keyed CMS tables.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(text) => text,
        IdRepr::Integer(n) => n.to_string(),
        IdRepr::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        IdRepr::Float(f) => f.to_string(),
    })
}

/// Empty maps serialized by loosely typed producers show up as `[]` or `null`.
#[derive(Deserialize)]
#[serde(untagged)]
enum TraitMapRepr {
    Map(TraitMap),
    EmptyList(Vec<IgnoredAny>),
}

fn deserialize_trait_map<'de, D>(deserializer: D) -> std::result::Result<TraitMap, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<TraitMapRepr>::deserialize(deserializer)? {
        Some(TraitMapRepr::Map(map)) => Ok(map),
        Some(TraitMapRepr::EmptyList(items)) if items.is_empty() => Ok(TraitMap::new()),
        Some(TraitMapRepr::EmptyList(_)) => Err(serde::de::Error::custom(
            "trait_map must be an object keyed by option id",
        )),
        None => Ok(TraitMap::new()),
    }
}
