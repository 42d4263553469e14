//! Usage frequency tracking
//!
//! For one effect file, counts its uses in every event list and finds the
//! moment where it is used most densely. Density is measured by a frequency
//! score that gains a fixed weight per use and decays by
//! `decay_base ^ (elapsed_ms / 1000)` between uses.
//!
//! Each list is scanned with its own score. The highest score seen so far is
//! carried across lists in a [`PeakTracker`], and a new peak is only recorded
//! when a score meets the significance threshold and strictly beats every
//! earlier score in the same pass.

use std::fmt;

use serde::Serialize;

use super::timestamp::format_timestamp;
use crate::config::AnalysisConfig;
use crate::pool::EventList;

/// Decaying score of recent uses within one event list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyScore {
    value: f64,
    prev_time_ms: f64,
}

impl FrequencyScore {
    /// Start a score at zero with decay measured from `start_ms`
    pub fn new(start_ms: f64) -> Self {
        Self {
            value: 0.0,
            prev_time_ms: start_ms,
        }
    }

    /// Current score
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Decay the score up to `time_ms` and move the reference time there
    ///
    /// No decay is applied for zero (or negative) elapsed time.
    pub fn decay_to(&mut self, time_ms: f64, decay_base: f64) {
        let elapsed = (time_ms - self.prev_time_ms).max(0.0);
        if elapsed > 0.0 {
            self.value *= decay_base.powf(elapsed / 1000.0);
        }
        self.prev_time_ms = time_ms;
    }

    /// Add one use of the given weight
    pub fn add(&mut self, weight: f64) {
        self.value += weight;
    }
}

/// The moment an effect file is used most densely
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsagePeak {
    /// Event time in milliseconds
    pub time_ms: f64,
    /// Event time formatted as `mm:ss:mmm`
    pub timestamp: String,
    /// Index of the owning list in the pool
    pub list_index: usize,
    /// Name of the owning list
    pub list_name: String,
    /// Frequency score at this moment
    pub score: f64,
}

impl fmt::Display for UsagePeak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.timestamp, self.list_name)
    }
}

/// Highest frequency score seen during one pass over all event lists
#[derive(Debug, Clone, Default)]
pub struct PeakTracker {
    highest_score: f64,
    peak: Option<UsagePeak>,
}

impl PeakTracker {
    /// Start a new pass
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest score recorded so far, 0.0 if none
    pub fn highest_score(&self) -> f64 {
        self.highest_score
    }

    /// Current peak, if any score has met the threshold
    pub fn peak(&self) -> Option<&UsagePeak> {
        self.peak.as_ref()
    }

    /// Finish the pass
    pub fn into_peak(self) -> Option<UsagePeak> {
        self.peak
    }

    /// Record `score` as the new peak if it meets `threshold` and strictly
    /// exceeds the highest score so far. Returns whether it was recorded.
    pub fn offer(
        &mut self,
        score: f64,
        threshold: f64,
        peak: impl FnOnce() -> UsagePeak,
    ) -> bool {
        if score < threshold || score <= self.highest_score {
            return false;
        }
        self.highest_score = score;
        self.peak = Some(peak());
        true
    }
}

/// Use counts and peak of one effect file across all event lists
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyScan {
    /// Uses per event list, in pool order
    pub uses: Vec<usize>,
    /// Moment of densest use, if the score ever met the threshold
    pub peak: Option<UsagePeak>,
}

/// Scan one event list for uses of `file_name`
///
/// # Arguments
///
/// * `list` - Event list to scan
/// * `list_index` - Position of the list in the pool, stored on peaks
/// * `file_name` - Effect file to look for
/// * `config` - Decay base and score threshold
/// * `tracker` - Peak bookmark shared by all lists of the current pass
///
/// # Returns
///
/// Number of events in the list that use the file
pub fn scan_event_list(
    list: &EventList,
    list_index: usize,
    file_name: &str,
    config: &AnalysisConfig,
    tracker: &mut PeakTracker,
) -> usize {
    let start_ms = list.events().first().map_or(0.0, |e| e.time_ms);
    let weight = list.mode().use_weight();
    let mut score = FrequencyScore::new(start_ms);
    let mut uses = 0;

    for event in list.events().iter().filter(|e| e.references(file_name)) {
        score.decay_to(event.time_ms, config.frequency_decay_base);
        uses += 1;
        score.add(weight);

        let value = score.value();
        if tracker.offer(value, config.frequency_score_threshold, || UsagePeak {
            time_ms: event.time_ms,
            timestamp: format_timestamp(event.time_ms),
            list_index,
            list_name: list.name().to_string(),
            score: value,
        }) {
            log::debug!(
                "{}: new peak {:.3} at {} in {}",
                file_name,
                value,
                format_timestamp(event.time_ms),
                list.name()
            );
        }
    }

    uses
}

/// Count uses of `file_name` in every list and find its densest moment
///
/// Lists are scanned left to right with one shared [`PeakTracker`], so on
/// equal scores the earliest list and event keep the peak.
pub fn collect_frequency(
    lists: &[EventList],
    file_name: &str,
    config: &AnalysisConfig,
) -> FrequencyScan {
    let mut tracker = PeakTracker::new();
    let uses = lists
        .iter()
        .enumerate()
        .map(|(i, list)| scan_event_list(list, i, file_name, config, &mut tracker))
        .collect();

    FrequencyScan {
        uses,
        peak: tracker.into_peak(),
    }
}
