//! Validation helper functions for configuration types.

use indexmap::IndexMap;

use crate::core::errors::{QuizMatchError, Result};

/// Validate that a usize value is at least `min`.
pub fn validate_min_usize(value: usize, min: usize, field: &str) -> Result<()> {
    if value < min {
        return Err(QuizMatchError::config_field(
            format!("{} must be at least {}, got {}", field, min, value),
            field,
        ));
    }
    Ok(())
}

/// Validate that an f64 value is finite and non-negative.
pub fn validate_non_negative(value: f64, field: &str) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(QuizMatchError::config_field(
            format!("{} must be a non-negative number, got {}", field, value),
            field,
        ));
    }
    Ok(())
}

/// Validate that an f64 value is in the unit range [0.0, 1.0].
pub fn validate_unit_range(value: f64, field: &str) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(QuizMatchError::config_field(
            format!("{} must be between 0.0 and 1.0, got {}", field, value),
            field,
        ));
    }
    Ok(())
}

/// Validate every weight in a keyed weight map.
pub fn validate_weight_map(weights: &IndexMap<String, f64>, field: &str) -> Result<()> {
    for (key, &weight) in weights {
        validate_non_negative(weight, &format!("{field}.{key}"))?;
    }
    Ok(())
}
