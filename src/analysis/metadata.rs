//! Analysis metadata structures

use serde::{Deserialize, Serialize};

/// Metadata about one pool analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Algorithm version
    pub algorithm_version: String,

    /// Number of effect files referenced by the pool
    pub files_checked: usize,

    /// Number of event lists scanned
    pub event_lists: usize,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f32,
}

impl Default for AnalysisMetadata {
    fn default() -> Self {
        Self {
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            files_checked: 0,
            event_lists: 0,
            processing_time_ms: 0.0,
        }
    }
}
