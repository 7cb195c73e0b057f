//! Achievable score ranges per trait.

use indexmap::IndexMap;
use tracing::debug;

use crate::core::quiz::{Question, QuizDefinition, TraitRange, TraitRanges};

/// Derives the min/max raw score each trait can reach across a quiz.
///
/// Every question contributes an independent window per trait: the lowest
/// weighted contribution among its options (never above zero, since a user
/// can pick an option that does not touch the trait) and the highest one.
/// Windows are summed across questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraitRangeCalculator;

impl TraitRangeCalculator {
    /// Create a new range calculator
    pub fn new() -> Self {
        Self
    }

    /// Compute per-trait ranges for `quiz`.
    ///
    /// Questions without a trait map are skipped entirely. Traits that no
    /// question mentions get no entry; normalization falls back to
    /// [`TraitRange::UNIT`] for them.
    pub fn calculate(&self, quiz: &QuizDefinition) -> TraitRanges {
        let mut ranges = TraitRanges::new();

        for question in &quiz.questions {
            if question.trait_map.is_empty() {
                continue;
            }

            for (trait_name, (window_min, window_max)) in question_window(question) {
                let range = ranges
                    .entry(trait_name.to_string())
                    .or_insert(TraitRange::new(0.0, 0.0));
                range.min += window_min;
                range.max += window_max;
            }
        }

        debug!(
            questions = quiz.questions.len(),
            traits = ranges.len(),
            "Computed trait ranges"
        );

        ranges
    }
}

/// Per-trait (min, max) weighted contribution among one question's options.
fn question_window(question: &Question) -> IndexMap<&str, (f64, f64)> {
    let mut window: IndexMap<&str, (f64, f64)> = IndexMap::new();

    for contributions in question.trait_map.values() {
        for (trait_name, &contribution) in contributions {
            let weighted = question.weight * contribution;
            window
                .entry(trait_name.as_str())
                .and_modify(|(lo, hi)| {
                    *lo = lo.min(weighted).min(0.0);
                    *hi = hi.max(weighted);
                })
                .or_insert((weighted.min(0.0), weighted));
        }
    }

    window
}

/// Compute trait ranges for a quiz.
pub fn calculate_trait_ranges(quiz: &QuizDefinition) -> TraitRanges {
    TraitRangeCalculator::new().calculate(quiz)
}
