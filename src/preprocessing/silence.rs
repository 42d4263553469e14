//! Silence detection

use super::channel_mixer::peak_strength;
use crate::io::clip::AudioClip;

/// Whether a clip carries no sound at all
///
/// Empty clips and clips whose every sample is zero are silent. A silent
/// clip has no onset, so it also has no delay.
pub fn is_silent(clip: &AudioClip) -> bool {
    clip.is_empty() || peak_strength(clip) == 0.0
}
