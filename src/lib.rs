//! # Hitsound Analysis
//!
//! Audio checks for the hit sounds of rhythm game maps that share one audio
//! pool (a "song folder").
//!
//! ## Features
//!
//! - **Delay detection**: finds hit sounds whose audible onset comes late
//!   enough to mislead players about their timing
//! - **Usage frequency**: counts how often each map uses a hit sound and
//!   finds the moment of densest use
//! - **Common usage**: picks the map that uses a hit sound habitually
//! - **WAV decoding**: 8/16/24/32-bit PCM and 32-bit float, mono or stereo,
//!   with a distinct error for every way a file can be unusable
//!
//! ## Quick Start
//!
//! ```no_run
//! use hitsound_analysis::{analyze_pool, AnalysisConfig};
//! use hitsound_analysis::pool::{EventList, GameMode, SongFolder, TriggerEvent};
//!
//! let hard = EventList::new(
//!     "Hard",
//!     GameMode::Standard,
//!     90_000.0,
//!     vec![TriggerEvent::new(1_000.0, ["soft-hitclap.wav"])],
//! )?;
//! let pool = SongFolder::new("songs/1234 Artist - Title", vec![hard]);
//!
//! let analysis = analyze_pool(&pool, AnalysisConfig::default())?;
//! for report in &analysis.delay_reports {
//!     println!("{:?}: {}", report.severity(), report);
//! }
//! # Ok::<(), hitsound_analysis::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! MapPool → resolve → Decoder → Onset delay estimator → delay reports
//!         → event lists → Frequency tracker → Common-user selector → usage
//! ```
//!
//! Delay estimation and usage tracking are independent of each other.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod pool;
pub mod preprocessing;

// Re-export main types
pub use analysis::delay_check::DelayCheck;
pub use analysis::report::{HitSoundReport, Severity};
pub use analysis::result::PoolAnalysis;
pub use analysis::usage_check::{HitSoundUsage, UsageCheck};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use io::clip::{AudioClip, DecodeOutcome};

use analysis::metadata::AnalysisMetadata;
use pool::MapPool;

/// Main analysis function
///
/// Runs the delay check and the usage check over every effect file the pool
/// references. Delay checks run in parallel across files; usage scans run
/// sequentially so peaks are found in a single left-to-right pass.
///
/// # Arguments
///
/// * `pool` - Event lists plus the folder their hit sounds live in
/// * `config` - Analysis configuration parameters
///
/// # Returns
///
/// `PoolAnalysis` with delay reports, usage summaries and run metadata
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the configuration is invalid.
/// Per-file problems never fail the analysis; they become `UnableToCheck`
/// reports.
pub fn analyze_pool<P>(pool: &P, config: AnalysisConfig) -> Result<PoolAnalysis, AnalysisError>
where
    P: MapPool + Sync + ?Sized,
{
    use std::time::Instant;
    let start_time = Instant::now();

    let files_checked = pool.referenced_effect_files().len();
    log::debug!(
        "Starting pool analysis: {} effect file(s), {} event list(s)",
        files_checked,
        pool.event_lists().len()
    );

    let delay_reports = DelayCheck::new(pool, config.clone())?.par_reports();
    let usage: Vec<HitSoundUsage> = UsageCheck::new(pool, config)?.summaries().collect();

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;
    log::debug!(
        "Pool analysis done: {} report(s) in {:.2} ms",
        delay_reports.len(),
        processing_time_ms
    );

    Ok(PoolAnalysis {
        delay_reports,
        usage,
        metadata: AnalysisMetadata {
            files_checked,
            event_lists: pool.event_lists().len(),
            processing_time_ms,
            ..Default::default()
        },
    })
}
