//! Hit sound delay check
//!
//! For every effect file the pool references: resolve it, decode it, estimate
//! its onset delay and report delays worth mentioning. A file that cannot be
//! resolved or decoded yields an `UnableToCheck` report and the check moves on
//! to the next file.

use rayon::prelude::*;

use super::report::HitSoundReport;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::onset::delay::estimate_onset_delay;
use crate::io::clip::AudioClip;
use crate::io::decoder::{load_clip, DecodeOutcome};
use crate::pool::MapPool;

/// Report the delay of an already decoded clip, if any
///
/// Takes ownership of the clip; it is dropped once analyzed.
pub fn check_clip_delay(
    file_name: &str,
    clip: AudioClip,
    config: &AnalysisConfig,
) -> Option<HitSoundReport> {
    let delay_ms = estimate_onset_delay(&clip, config);
    HitSoundReport::from_delay(file_name, delay_ms, config)
}

/// Resolve, decode and check one effect file of the pool
pub fn check_file<P: MapPool + ?Sized>(
    pool: &P,
    file_name: &str,
    config: &AnalysisConfig,
) -> Option<HitSoundReport> {
    let path = match pool.resolve(file_name) {
        Ok(path) => path,
        Err(e) => return Some(unable_to_check(file_name, e.reason())),
    };

    match load_clip(&path) {
        DecodeOutcome::Decoded(clip) => check_clip_delay(file_name, clip, config),
        DecodeOutcome::Failed(reason) => Some(unable_to_check(file_name, reason)),
    }
}

fn unable_to_check(file_name: &str, reason: String) -> HitSoundReport {
    log::warn!("Unable to check {}: {}", file_name, reason);
    HitSoundReport::UnableToCheck {
        path: file_name.to_string(),
        reason,
    }
}

/// Delay check over every effect file referenced by a pool
#[derive(Debug)]
pub struct DelayCheck<'a, P: MapPool + ?Sized> {
    pool: &'a P,
    config: AnalysisConfig,
}

impl<'a, P: MapPool + ?Sized> DelayCheck<'a, P> {
    /// Create a delay check
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if the configuration is invalid
    pub fn new(pool: &'a P, config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { pool, config })
    }

    /// Lazily check each referenced file in order, yielding only files that
    /// produce a report. Each call starts a fresh pass.
    pub fn reports(&self) -> impl Iterator<Item = HitSoundReport> + '_ {
        self.pool
            .referenced_effect_files()
            .into_iter()
            .filter_map(move |file| check_file(self.pool, &file, &self.config))
    }

    /// Check every referenced file on the rayon thread pool
    ///
    /// Files are independent, so they are decoded and analyzed in parallel;
    /// reports come back in the same order as [`DelayCheck::reports`].
    pub fn par_reports(&self) -> Vec<HitSoundReport>
    where
        P: Sync,
    {
        let files = self.pool.referenced_effect_files();
        log::debug!("Checking {} hit sound file(s) in parallel", files.len());

        files
            .par_iter()
            .filter_map(|file| check_file(self.pool, file, &self.config))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{EventList, GameMode, TriggerEvent};
    use std::path::PathBuf;

    struct NothingOnDisk(Vec<EventList>);

    impl MapPool for NothingOnDisk {
        fn resolve(&self, file_name: &str) -> Result<PathBuf, AnalysisError> {
            Err(AnalysisError::NotFound(format!("{} is missing", file_name)))
        }

        fn event_lists(&self) -> &[EventList] {
            &self.0
        }
    }

    fn delayed_clip(delay_ms: f64) -> AudioClip {
        let mut samples = vec![0.0f32; (delay_ms * 50.0) as usize];
        samples.extend(vec![0.9f32; 500]);
        AudioClip::mono("clip.wav", samples, 44100)
    }

    #[test]
    fn test_check_clip_delay() {
        let config = AnalysisConfig::default();
        assert!(matches!(
            check_clip_delay("a.wav", delayed_clip(10.0), &config),
            Some(HitSoundReport::Delay { delay_ms, .. }) if delay_ms == 10.0
        ));
        assert!(matches!(
            check_clip_delay("a.wav", delayed_clip(2.0), &config),
            Some(HitSoundReport::MinorDelay { .. })
        ));
        assert!(check_clip_delay("a.wav", delayed_clip(0.0), &config).is_none());
        assert!(check_clip_delay("a.wav", AudioClip::mono("s", vec![0.0; 100], 1), &config).is_none());
    }

    #[test]
    fn test_missing_files_are_unable_to_check() {
        let list = EventList::new(
            "Hard",
            GameMode::Standard,
            1000.0,
            vec![TriggerEvent::new(0.0, ["a.wav", "b.wav"])],
        )
        .unwrap();
        let pool = NothingOnDisk(vec![list]);
        let check = DelayCheck::new(&pool, AnalysisConfig::default()).unwrap();

        let reports: Vec<_> = check.reports().collect();
        assert_eq!(reports.len(), 2);
        assert!(reports
            .iter()
            .all(|r| matches!(r, HitSoundReport::UnableToCheck { .. })));
        assert_eq!(reports[0].path(), "a.wav");

        // Restartable
        assert_eq!(check.reports().count(), 2);
        assert_eq!(check.par_reports(), reports);
    }

    #[test]
    fn test_empty_pool_has_no_reports() {
        let pool = NothingOnDisk(vec![]);
        let check = DelayCheck::new(&pool, AnalysisConfig::default()).unwrap();
        assert_eq!(check.reports().count(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let pool = NothingOnDisk(vec![]);
        let config = AnalysisConfig {
            onset_retention: -1.0,
            ..Default::default()
        };
        assert!(DelayCheck::new(&pool, config).is_err());
    }
}
