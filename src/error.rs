//! Error types for hit sound analysis

use std::fmt;
use std::io;

/// Errors that can occur while locating, decoding or analyzing a hit sound
///
/// Every variant is recoverable per file: the checks turn it into an
/// "unable to check" report using [`AnalysisError::reason`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Invalid input parameters
    InvalidInput(String),

    /// Asset could not be located in the pool
    NotFound(String),

    /// File is empty or ends before its header/body is complete
    Truncated(String),

    /// Header or body inconsistent with the declared layout
    Malformed(String),

    /// Encoding or bit depth outside the supported set
    UnsupportedEncoding(String),

    /// Channel count outside {1, 2}
    UnsupportedChannels(u16),

    /// Read error unrelated to the file contents
    Io(String),
}

impl AnalysisError {
    /// Human-readable reason, phrased to follow the file name in a report
    ///
    /// # Example
    ///
    /// ```
    /// use hitsound_analysis::AnalysisError;
    ///
    /// let err = AnalysisError::UnsupportedChannels(6);
    /// assert_eq!(err.reason(), "has an unsupported channel count of 6");
    /// ```
    pub fn reason(&self) -> String {
        match self {
            AnalysisError::InvalidInput(msg) => format!("could not be analyzed ({})", msg),
            AnalysisError::NotFound(msg) => format!("could not be found ({})", msg),
            AnalysisError::Truncated(msg) => format!("is truncated ({})", msg),
            AnalysisError::Malformed(msg) => format!("is malformed ({})", msg),
            AnalysisError::UnsupportedEncoding(msg) => {
                format!("has an unsupported encoding ({})", msg)
            }
            AnalysisError::UnsupportedChannels(n) => {
                format!("has an unsupported channel count of {}", n)
            }
            AnalysisError::Io(msg) => format!("could not be read ({})", msg),
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AnalysisError::Truncated(msg) => write!(f, "Truncated file: {}", msg),
            AnalysisError::Malformed(msg) => write!(f, "Malformed file: {}", msg),
            AnalysisError::UnsupportedEncoding(msg) => write!(f, "Unsupported encoding: {}", msg),
            AnalysisError::UnsupportedChannels(n) => {
                write!(f, "Unsupported channel count: {} (expected 1 or 2)", n)
            }
            AnalysisError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<io::Error> for AnalysisError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => AnalysisError::NotFound(err.to_string()),
            io::ErrorKind::UnexpectedEof => AnalysisError::Truncated(err.to_string()),
            _ => AnalysisError::Io(err.to_string()),
        }
    }
}

impl From<symphonia::core::errors::Error> for AnalysisError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        use symphonia::core::errors::Error;
        match err {
            Error::IoError(e) => e.into(),
            Error::DecodeError(msg) => AnalysisError::Malformed(msg.to_string()),
            Error::Unsupported(msg) => AnalysisError::UnsupportedEncoding(msg.to_string()),
            other => AnalysisError::Malformed(other.to_string()),
        }
    }
}
