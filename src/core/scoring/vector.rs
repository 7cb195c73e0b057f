//! Answer accumulation and min-max normalization into trait vectors.

use tracing::{debug, warn};

use crate::core::errors::{QuizMatchError, Result};
use crate::core::quiz::{Answer, QuizDefinition, TraitRange, TraitRanges, TraitVector};
use crate::core::scoring::ranges::TraitRangeCalculator;

/// Turns a list of answers into a normalized `[0, 1]` trait vector.
///
/// By default the calculator is lenient: answers pointing at unknown
/// questions or options are skipped, and the result is always some vector.
/// Strict mode rejects those answers, plus non-finite weights and
/// contributions, with [`QuizMatchError::InvalidInput`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TraitVectorCalculator {
    strict: bool,
}

impl TraitVectorCalculator {
    /// Create a lenient calculator
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Create a calculator that rejects unknown ids and non-finite numbers
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Set strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Whether strict mode is enabled
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Accumulate raw, unnormalized per-trait scores.
    ///
    /// Each answer adds `weight * contribution` for every trait of the chosen
    /// option. Repeated answers to the same question all count.
    pub fn raw_scores(&self, answers: &[Answer], quiz: &QuizDefinition) -> Result<TraitVector> {
        if self.strict {
            check_answers(answers, quiz)?;
        }
        Ok(accumulate(answers, quiz))
    }

    /// Compute the normalized trait vector for `answers`.
    pub fn calculate(&self, answers: &[Answer], quiz: &QuizDefinition) -> Result<TraitVector> {
        let raw = self.raw_scores(answers, quiz)?;
        let ranges = TraitRangeCalculator::new().calculate(quiz);
        let normalized = normalize(&raw, &ranges);

        debug!(
            answers = answers.len(),
            traits = normalized.len(),
            strict = self.strict,
            "Calculated trait vector"
        );

        Ok(normalized)
    }
}

fn accumulate(answers: &[Answer], quiz: &QuizDefinition) -> TraitVector {
    let mut raw = TraitVector::new();

    for answer in answers {
        let Some(question) = quiz.question(&answer.question_id) else {
            warn!(question_id = %answer.question_id, "Skipping answer to unknown question");
            continue;
        };
        let Some(contributions) = question.option(&answer.option_id) else {
            warn!(
                question_id = %answer.question_id,
                option_id = %answer.option_id,
                "Skipping answer with unknown option"
            );
            continue;
        };

        for (trait_name, &contribution) in contributions {
            *raw.entry(trait_name.clone()).or_insert(0.0) += question.weight * contribution;
        }
    }

    raw
}

fn check_answers(answers: &[Answer], quiz: &QuizDefinition) -> Result<()> {
    for (index, answer) in answers.iter().enumerate() {
        let field = format!("answers[{index}]");

        let question = quiz.question(&answer.question_id).ok_or_else(|| {
            QuizMatchError::invalid_input_field(
                format!("Unknown question id '{}'", answer.question_id),
                field.clone(),
            )
        })?;

        if !question.weight.is_finite() {
            return Err(QuizMatchError::invalid_input_field(
                format!("Question '{}' has a non-finite weight", question.id),
                field,
            ));
        }

        let contributions = question.option(&answer.option_id).ok_or_else(|| {
            QuizMatchError::invalid_input_field(
                format!(
                    "Unknown option '{}' for question '{}'",
                    answer.option_id, answer.question_id
                ),
                field.clone(),
            )
        })?;

        if let Some((trait_name, _)) = contributions.iter().find(|(_, v)| !v.is_finite()) {
            return Err(QuizMatchError::invalid_input_field(
                format!(
                    "Option '{}' contributes a non-finite value to '{trait_name}'",
                    answer.option_id
                ),
                field,
            ));
        }
    }

    Ok(())
}

/// Min-max normalize a raw vector against trait ranges.
///
/// Covers every trait in either input: ranged traits first in range order,
/// then raw-only traits. Missing raw values count as 0, missing ranges as
/// [`TraitRange::UNIT`], and flat ranges produce 0.5.
pub fn normalize(raw: &TraitVector, ranges: &TraitRanges) -> TraitVector {
    let mut normalized = TraitVector::with_capacity(ranges.len().max(raw.len()));

    for (trait_name, range) in ranges {
        let value = raw.get(trait_name).copied().unwrap_or(0.0);
        normalized.insert(trait_name.clone(), range.normalize(value));
    }

    for (trait_name, &value) in raw {
        if !normalized.contains_key(trait_name) {
            normalized.insert(trait_name.clone(), TraitRange::UNIT.normalize(value));
        }
    }

    normalized
}

/// Lenient trait vector calculation; never fails.
pub fn calculate_trait_vector(answers: &[Answer], quiz: &QuizDefinition) -> TraitVector {
    let raw = accumulate(answers, quiz);
    let ranges = TraitRangeCalculator::new().calculate(quiz);
    normalize(&raw, &ranges)
}

#[cfg(test)]
#[path = "vector_tests.rs"]
mod tests;
