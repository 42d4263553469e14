//! Onset delay estimation
//!
//! Finds how long a hit sound takes to become audible using a leaky
//! integrator over the amplitude envelope:
//!
//! 1. Compute the clip's peak strength (averaged over channels for stereo)
//! 2. Walk the envelope from the first sample, adding each sample's
//!    absolute amplitude to an accumulator
//! 3. Stop at the first sample where the accumulator reaches half the peak
//!    strength; otherwise scale the accumulator by the retention factor and
//!    move on
//! 4. Convert the stopping index to milliseconds at a fixed 50 samples/ms
//!
//! The decay keeps an isolated click near the start from counting as the
//! onset while a fade-in still accumulates past the threshold.
//!
//! # Example
//!
//! ```
//! use hitsound_analysis::features::onset::delay::estimate_onset_delay;
//! use hitsound_analysis::io::clip::AudioClip;
//! use hitsound_analysis::AnalysisConfig;
//!
//! // 5 ms of silence, then a full-scale signal
//! let mut samples = vec![0.0f32; 250];
//! samples.extend(vec![1.0f32; 500]);
//! let clip = AudioClip::mono("delayed.wav", samples, 44100);
//!
//! let delay = estimate_onset_delay(&clip, &AnalysisConfig::default());
//! assert!((delay - 5.0).abs() < 0.02);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::io::clip::AudioClip;
use crate::preprocessing::channel_mixer::{envelope_at, peak_strength};
use crate::preprocessing::silence::is_silent;

/// How severe a measured delay is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DelaySeverity {
    /// Delay at or above the warning threshold (default 5 ms)
    Warning,
    /// Delay between the minor and warning thresholds (default 0.5 to 5 ms)
    Minor,
}

impl DelaySeverity {
    /// Classify a delay, returning `None` when it is too small to report
    ///
    /// # Example
    ///
    /// ```
    /// use hitsound_analysis::features::onset::delay::DelaySeverity;
    /// use hitsound_analysis::AnalysisConfig;
    ///
    /// let config = AnalysisConfig::default();
    /// assert_eq!(DelaySeverity::classify(5.0, &config), Some(DelaySeverity::Warning));
    /// assert_eq!(DelaySeverity::classify(0.5, &config), Some(DelaySeverity::Minor));
    /// assert_eq!(DelaySeverity::classify(0.48, &config), None);
    /// ```
    pub fn classify(delay_ms: f64, config: &AnalysisConfig) -> Option<Self> {
        if delay_ms >= config.delay_warning_ms {
            Some(DelaySeverity::Warning)
        } else if delay_ms >= config.delay_minor_ms {
            Some(DelaySeverity::Minor)
        } else {
            None
        }
    }
}

/// Index of the first sample where the clip becomes audible
///
/// Returns 0 for silent clips. If the accumulator never reaches the
/// threshold, the last sample index is returned.
pub fn find_onset(clip: &AudioClip, config: &AnalysisConfig) -> usize {
    if is_silent(clip) {
        log::debug!("{} is silent, no onset", clip.name());
        return 0;
    }

    let threshold = peak_strength(clip) * config.onset_threshold_ratio;
    let mut strength = 0.0f64;

    for i in 0..clip.len() {
        strength += envelope_at(clip, i);
        if strength >= threshold {
            return i;
        }
        strength *= config.onset_retention;
    }

    log::warn!(
        "{}: accumulator never reached {:.4}, using last sample as onset",
        clip.name(),
        threshold
    );
    clip.len() - 1
}

/// Estimate the onset delay of a clip in milliseconds
///
/// # Arguments
///
/// * `clip` - Decoded hit sound
/// * `config` - Analysis configuration (retention, threshold ratio, resolution)
///
/// # Returns
///
/// Delay in milliseconds; 0.0 for clips that are empty, silent, or audible
/// from the first sample
pub fn estimate_onset_delay(clip: &AudioClip, config: &AnalysisConfig) -> f64 {
    let onset = find_onset(clip, config);
    let delay_ms = onset as f64 / config.samples_per_ms;

    log::debug!(
        "{}: onset at sample {} ({:.2} ms)",
        clip.name(),
        onset,
        delay_ms
    );

    delay_ms
}
