//! Configuration parameters for hit sound analysis

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Analysis configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    // Onset detection
    /// Fixed scan resolution used to convert sample indices to milliseconds
    /// (default: 50.0, i.e. 50 samples per ms regardless of the file's rate)
    pub samples_per_ms: f64,

    /// Fraction of the accumulator kept between samples (default: 0.75)
    pub onset_retention: f64,

    /// Fraction of the peak strength the accumulator must reach (default: 0.5)
    pub onset_threshold_ratio: f64,

    /// Delay at or above which a clip gets a warning (default: 5.0 ms)
    pub delay_warning_ms: f64,

    /// Delay at or above which a clip gets a minor report (default: 0.5 ms)
    pub delay_minor_ms: f64,

    // Usage frequency
    /// Base of the per-second decay applied to the frequency score (default: 0.8)
    pub frequency_decay_base: f64,

    /// Minimum frequency score before a peak may be recorded (default: 7.0)
    pub frequency_score_threshold: f64,

    /// Mean gap between uses, in ms, below which a hit sound counts as
    /// commonly used in a list (default: 15000.0)
    pub common_usage_threshold_ms: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            samples_per_ms: 50.0,
            onset_retention: 0.75,
            onset_threshold_ratio: 0.5,
            delay_warning_ms: 5.0,
            delay_minor_ms: 0.5,
            frequency_decay_base: 0.8,
            frequency_score_threshold: 7.0,
            common_usage_threshold_ms: 15_000.0,
        }
    }
}

impl AnalysisConfig {
    /// Check that every parameter is within its meaningful range
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` naming the first offending field
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(self.samples_per_ms > 0.0) {
            return Err(AnalysisError::InvalidInput(format!(
                "samples_per_ms must be > 0, got {}",
                self.samples_per_ms
            )));
        }

        if !(0.0..1.0).contains(&self.onset_retention) {
            return Err(AnalysisError::InvalidInput(format!(
                "onset_retention must be in [0.0, 1.0), got {}",
                self.onset_retention
            )));
        }

        if !(self.onset_threshold_ratio > 0.0 && self.onset_threshold_ratio <= 1.0) {
            return Err(AnalysisError::InvalidInput(format!(
                "onset_threshold_ratio must be in (0.0, 1.0], got {}",
                self.onset_threshold_ratio
            )));
        }

        if self.delay_minor_ms < 0.0 || self.delay_minor_ms > self.delay_warning_ms {
            return Err(AnalysisError::InvalidInput(format!(
                "delay thresholds must satisfy 0 <= minor ({}) <= warning ({})",
                self.delay_minor_ms, self.delay_warning_ms
            )));
        }

        if !(self.frequency_decay_base > 0.0 && self.frequency_decay_base <= 1.0) {
            return Err(AnalysisError::InvalidInput(format!(
                "frequency_decay_base must be in (0.0, 1.0], got {}",
                self.frequency_decay_base
            )));
        }

        if self.frequency_score_threshold < 0.0 || self.common_usage_threshold_ms < 0.0 {
            return Err(AnalysisError::InvalidInput(
                "usage thresholds must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}
