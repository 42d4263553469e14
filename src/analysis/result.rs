//! Pool analysis result types

use serde::Serialize;

use super::metadata::AnalysisMetadata;
use super::report::{HitSoundReport, Severity};
use super::usage_check::HitSoundUsage;

/// Everything found about one map pool
#[derive(Debug, Clone, Serialize)]
pub struct PoolAnalysis {
    /// Delay and decode reports, in referenced-file order
    pub delay_reports: Vec<HitSoundReport>,

    /// Usage summary per referenced file, in the same order
    pub usage: Vec<HitSoundUsage>,

    /// Run metadata
    pub metadata: AnalysisMetadata,
}

impl PoolAnalysis {
    /// Reports at or above the given severity
    pub fn reports_at_least(&self, severity: Severity) -> impl Iterator<Item = &HitSoundReport> {
        self.delay_reports
            .iter()
            .filter(move |r| r.severity() >= severity)
    }

    /// Usage summary for one file, if the pool references it
    pub fn usage_of(&self, file_name: &str) -> Option<&HitSoundUsage> {
        self.usage
            .iter()
            .find(|u| crate::pool::same_file_name(&u.file, file_name))
    }
}
