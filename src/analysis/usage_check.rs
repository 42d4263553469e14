//! Hit sound usage check
//!
//! Combines the frequency tracker and the dominant-user selector into one
//! summary per effect file: how often each map uses it, where its use peaks,
//! and which map (if any) uses it habitually.

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::usage::common_usage::select_common_user;
use crate::features::usage::frequency::{collect_frequency, UsagePeak};
use crate::pool::{EventList, MapPool};

/// Uses of one effect file in one event list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListUsage {
    /// Event list name
    pub list: String,
    /// Number of events using the file
    pub uses: usize,
}

/// Usage summary of one effect file across the pool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitSoundUsage {
    /// Effect file identifier
    pub file: String,
    /// Uses per event list, in pool order
    pub lists: Vec<ListUsage>,
    /// Densest moment of use, if the score ever met the threshold
    pub peak: Option<UsagePeak>,
    /// Index into `lists` of the list the file is commonly used in
    pub commonly_used_in: Option<usize>,
}

impl HitSoundUsage {
    /// Uses across all lists
    pub fn total_uses(&self) -> usize {
        self.lists.iter().map(|l| l.uses).sum()
    }

    /// The list the file is commonly used in
    pub fn common_list(&self) -> Option<&ListUsage> {
        self.commonly_used_in.and_then(|i| self.lists.get(i))
    }
}

/// Summarize the usage of `file_name` across `lists`
pub fn analyze_usage(lists: &[EventList], file_name: &str, config: &AnalysisConfig) -> HitSoundUsage {
    let scan = collect_frequency(lists, file_name, config);
    let commonly_used_in = select_common_user(lists, &scan.uses, config.common_usage_threshold_ms);

    HitSoundUsage {
        file: file_name.to_string(),
        lists: lists
            .iter()
            .zip(&scan.uses)
            .map(|(list, &uses)| ListUsage {
                list: list.name().to_string(),
                uses,
            })
            .collect(),
        peak: scan.peak,
        commonly_used_in,
    }
}

/// Usage check over every effect file referenced by a pool
#[derive(Debug)]
pub struct UsageCheck<'a, P: MapPool + ?Sized> {
    pool: &'a P,
    config: AnalysisConfig,
}

impl<'a, P: MapPool + ?Sized> UsageCheck<'a, P> {
    /// Create a usage check
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if the configuration is invalid
    pub fn new(pool: &'a P, config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { pool, config })
    }

    /// Lazily summarize each referenced file in order. Each call starts a
    /// fresh pass with its own peak bookmark.
    pub fn summaries(&self) -> impl Iterator<Item = HitSoundUsage> + '_ {
        self.pool
            .referenced_effect_files()
            .into_iter()
            .map(move |file| analyze_usage(self.pool.event_lists(), &file, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{GameMode, TriggerEvent};
    use std::path::PathBuf;

    struct ListsOnly(Vec<EventList>);

    impl MapPool for ListsOnly {
        fn resolve(&self, file_name: &str) -> Result<PathBuf, AnalysisError> {
            Ok(PathBuf::from(file_name))
        }

        fn event_lists(&self) -> &[EventList] {
            &self.0
        }
    }

    fn evenly_spaced(name: &str, uses: usize, file: &str) -> EventList {
        let step = 100_000.0 / uses as f64;
        let events = (0..uses)
            .map(|i| TriggerEvent::new(i as f64 * step, [file]))
            .collect();
        EventList::new(name, GameMode::Standard, 100_000.0, events).unwrap()
    }

    #[test]
    fn test_dense_list_is_common_user() {
        let lists = vec![
            evenly_spaced("A", 100, "x.wav"),
            evenly_spaced("B", 2, "x.wav"),
        ];
        let config = AnalysisConfig {
            common_usage_threshold_ms: 1200.0,
            ..Default::default()
        };
        let usage = analyze_usage(&lists, "x.wav", &config);

        assert_eq!(usage.total_uses(), 102);
        assert_eq!(usage.lists[0].uses, 100);
        assert_eq!(usage.lists[1].uses, 2);
        assert_eq!(usage.commonly_used_in, Some(0));
        assert_eq!(usage.common_list().unwrap().list, "A");
    }

    #[test]
    fn test_unused_file_has_empty_summary() {
        let lists = vec![evenly_spaced("A", 10, "x.wav")];
        let usage = analyze_usage(&lists, "y.wav", &AnalysisConfig::default());
        assert_eq!(usage.total_uses(), 0);
        assert!(usage.peak.is_none());
        assert!(usage.common_list().is_none());
    }

    #[test]
    fn test_summaries_cover_each_referenced_file() {
        let pool = ListsOnly(vec![
            evenly_spaced("A", 4, "x.wav"),
            evenly_spaced("B", 4, "y.wav"),
        ]);
        let check = UsageCheck::new(&pool, AnalysisConfig::default()).unwrap();
        let files: Vec<String> = check.summaries().map(|s| s.file).collect();
        assert_eq!(files, vec!["x.wav", "y.wav"]);
        assert_eq!(check.summaries().count(), 2);
    }
}
