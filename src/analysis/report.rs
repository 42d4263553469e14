//! Report types produced by the checks

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::features::onset::delay::DelaySeverity;

/// Report severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Small problem, worth a look
    Minor,
    /// Problem that should be fixed
    Warning,
    /// The file could not be checked at all
    Error,
}

/// One finding about one hit sound file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HitSoundReport {
    /// Onset delay at or above the warning threshold
    Delay {
        /// File name as referenced by the maps
        path: String,
        /// Estimated delay in milliseconds
        delay_ms: f64,
    },
    /// Onset delay between the minor and warning thresholds
    MinorDelay {
        /// File name as referenced by the maps
        path: String,
        /// Estimated delay in milliseconds
        delay_ms: f64,
    },
    /// The file could not be located or decoded
    UnableToCheck {
        /// File name as referenced by the maps
        path: String,
        /// Why the file could not be checked
        reason: String,
    },
}

impl HitSoundReport {
    /// Build a delay report, or `None` if the delay is too small to report
    pub fn from_delay(path: &str, delay_ms: f64, config: &AnalysisConfig) -> Option<Self> {
        let path = path.to_string();
        DelaySeverity::classify(delay_ms, config).map(|severity| match severity {
            DelaySeverity::Warning => HitSoundReport::Delay { path, delay_ms },
            DelaySeverity::Minor => HitSoundReport::MinorDelay { path, delay_ms },
        })
    }

    /// File the report is about
    pub fn path(&self) -> &str {
        match self {
            HitSoundReport::Delay { path, .. }
            | HitSoundReport::MinorDelay { path, .. }
            | HitSoundReport::UnableToCheck { path, .. } => path,
        }
    }

    /// Severity of the report
    pub fn severity(&self) -> Severity {
        match self {
            HitSoundReport::Delay { .. } => Severity::Warning,
            HitSoundReport::MinorDelay { .. } => Severity::Minor,
            HitSoundReport::UnableToCheck { .. } => Severity::Error,
        }
    }
}

impl fmt::Display for HitSoundReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HitSoundReport::Delay { path, delay_ms }
            | HitSoundReport::MinorDelay { path, delay_ms } => {
                write!(f, "\"{}\" has a delay of ~{} ms.", path, format_ms(*delay_ms))
            }
            HitSoundReport::UnableToCheck { path, reason } => {
                write!(f, "\"{}\" {}, so unable to check that.", path, reason)
            }
        }
    }
}

/// At most two decimals, without trailing zeros
fn format_ms(ms: f64) -> String {
    let fixed = format!("{:.2}", ms);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_delay_classifies() {
        let config = AnalysisConfig::default();
        assert!(matches!(
            HitSoundReport::from_delay("a.wav", 7.5, &config),
            Some(HitSoundReport::Delay { .. })
        ));
        assert!(matches!(
            HitSoundReport::from_delay("a.wav", 1.0, &config),
            Some(HitSoundReport::MinorDelay { .. })
        ));
        assert!(HitSoundReport::from_delay("a.wav", 0.2, &config).is_none());
    }

    #[test]
    fn test_severity_and_path() {
        let report = HitSoundReport::UnableToCheck {
            path: "b.wav".to_string(),
            reason: "is truncated (file is empty)".to_string(),
        };
        assert_eq!(report.severity(), Severity::Error);
        assert_eq!(report.path(), "b.wav");
        assert!(Severity::Error > Severity::Warning && Severity::Warning > Severity::Minor);
    }

    #[test]
    fn test_display_messages() {
        let delay = HitSoundReport::Delay {
            path: "soft-hitclap.wav".to_string(),
            delay_ms: 6.5,
        };
        assert_eq!(delay.to_string(), "\"soft-hitclap.wav\" has a delay of ~6.5 ms.");

        let minor = HitSoundReport::MinorDelay {
            path: "x.wav".to_string(),
            delay_ms: 0.56,
        };
        assert_eq!(minor.to_string(), "\"x.wav\" has a delay of ~0.56 ms.");

        let whole = HitSoundReport::Delay {
            path: "y.wav".to_string(),
            delay_ms: 12.0,
        };
        assert_eq!(whole.to_string(), "\"y.wav\" has a delay of ~12 ms.");

        let failed = HitSoundReport::UnableToCheck {
            path: "z.wav".to_string(),
            reason: "is malformed (not a RIFF/WAVE container)".to_string(),
        };
        assert_eq!(
            failed.to_string(),
            "\"z.wav\" is malformed (not a RIFF/WAVE container), so unable to check that."
        );
    }
}
