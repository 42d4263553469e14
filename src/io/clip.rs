//! Decoded audio clips

use crate::error::AnalysisError;

/// A decoded hit sound: one or two channels of samples normalized to [-1.0, 1.0]
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    name: String,
    left: Vec<f32>,
    right: Option<Vec<f32>>,
    sample_rate: u32,
}

impl AudioClip {
    /// Create a mono clip
    pub fn mono(name: impl Into<String>, samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            name: name.into(),
            left: samples,
            right: None,
            sample_rate,
        }
    }

    /// Create a stereo clip
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if the channels differ in length
    pub fn stereo(
        name: impl Into<String>,
        left: Vec<f32>,
        right: Vec<f32>,
        sample_rate: u32,
    ) -> Result<Self, AnalysisError> {
        if left.len() != right.len() {
            return Err(AnalysisError::InvalidInput(format!(
                "channel lengths differ: left={}, right={}",
                left.len(),
                right.len()
            )));
        }

        Ok(Self {
            name: name.into(),
            left,
            right: Some(right),
            sample_rate,
        })
    }

    /// File name or path the clip was decoded from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Left channel, or the only channel of a mono clip
    pub fn left(&self) -> &[f32] {
        &self.left
    }

    /// Right channel, `None` for mono clips
    pub fn right(&self) -> Option<&[f32]> {
        self.right.as_deref()
    }

    /// Number of channels (1 or 2)
    pub fn channels(&self) -> u16 {
        if self.right.is_some() {
            2
        } else {
            1
        }
    }

    /// Number of samples per channel
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether the clip holds no samples
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Sample rate declared by the container. Informational only; delay
    /// estimation uses a fixed resolution instead.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// Outcome of loading one clip: either samples or the reason it failed
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// Clip decoded successfully
    Decoded(AudioClip),
    /// Clip could not be decoded; carries a human-readable reason
    Failed(String),
}

impl From<Result<AudioClip, AnalysisError>> for DecodeOutcome {
    fn from(result: Result<AudioClip, AnalysisError>) -> Self {
        match result {
            Ok(clip) => DecodeOutcome::Decoded(clip),
            Err(e) => DecodeOutcome::Failed(e.reason()),
        }
    }
}
