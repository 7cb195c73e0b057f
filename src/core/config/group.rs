//! Group insight configuration types.

use serde::{Deserialize, Serialize};

use crate::core::config::validation::{validate_min_usize, validate_unit_range};
use crate::core::errors::{QuizMatchError, Result};

/// Smallest group the insight engine will accept.
pub const MIN_GROUP_SIZE: usize = 3;

/// Thresholds for group insights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Minimum number of participants (never below 3)
    #[serde(default = "GroupConfig::default_min_participants")]
    pub min_participants: usize,

    /// Average match at or above which a group counts as highly aligned
    #[serde(default = "GroupConfig::default_high_alignment_threshold")]
    pub high_alignment_threshold: f64,

    /// Average match at or above which a group counts as moderately aligned
    #[serde(default = "GroupConfig::default_moderate_alignment_threshold")]
    pub moderate_alignment_threshold: f64,

    /// Variance below which the least-varying trait is reported as aligned
    #[serde(default = "GroupConfig::default_variance_threshold")]
    pub aligned_variance_threshold: f64,

    /// Variance above which the most-varying trait is reported as diverse
    #[serde(default = "GroupConfig::default_variance_threshold")]
    pub diverse_variance_threshold: f64,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            min_participants: Self::default_min_participants(),
            high_alignment_threshold: Self::default_high_alignment_threshold(),
            moderate_alignment_threshold: Self::default_moderate_alignment_threshold(),
            aligned_variance_threshold: Self::default_variance_threshold(),
            diverse_variance_threshold: Self::default_variance_threshold(),
        }
    }
}

impl GroupConfig {
    fn default_min_participants() -> usize {
        MIN_GROUP_SIZE
    }

    fn default_high_alignment_threshold() -> f64 {
        0.75
    }

    fn default_moderate_alignment_threshold() -> f64 {
        0.60
    }

    fn default_variance_threshold() -> f64 {
        0.1
    }

    /// Validate group configuration
    pub fn validate(&self) -> Result<()> {
        validate_min_usize(
            self.min_participants,
            MIN_GROUP_SIZE,
            "group.min_participants",
        )?;
        validate_unit_range(
            self.high_alignment_threshold,
            "group.high_alignment_threshold",
        )?;
        validate_unit_range(
            self.moderate_alignment_threshold,
            "group.moderate_alignment_threshold",
        )?;
        // Variance of [0, 1] values never exceeds 0.25.
        validate_unit_range(
            self.aligned_variance_threshold,
            "group.aligned_variance_threshold",
        )?;
        validate_unit_range(
            self.diverse_variance_threshold,
            "group.diverse_variance_threshold",
        )?;

        if self.moderate_alignment_threshold > self.high_alignment_threshold {
            return Err(QuizMatchError::config_field(
                format!(
                    "moderate_alignment_threshold ({}) must not exceed high_alignment_threshold ({})",
                    self.moderate_alignment_threshold, self.high_alignment_threshold
                ),
                "group.moderate_alignment_threshold",
            ));
        }

        Ok(())
    }
}
