//! Channel mixing into a single amplitude envelope

use crate::io::clip::AudioClip;

/// Absolute amplitude of the clip at sample `index`
///
/// Stereo clips average the two channels' absolute values, so a sound panned
/// hard to one side counts at half strength.
///
/// # Panics
///
/// Panics if `index >= clip.len()`.
pub fn envelope_at(clip: &AudioClip, index: usize) -> f64 {
    let left = clip.left()[index].abs() as f64;
    match clip.right() {
        Some(right) => (left + right[index].abs() as f64) / 2.0,
        None => left,
    }
}

/// Peak strength of the clip
///
/// The maximum absolute amplitude of a mono clip, or the average of the two
/// channels' individual maxima for stereo. Note this is not the peak of the
/// mixed envelope: the channels may peak at different samples.
pub fn peak_strength(clip: &AudioClip) -> f64 {
    let left = max_abs(clip.left());
    match clip.right() {
        Some(right) => (left + max_abs(right)) / 2.0,
        None => left,
    }
}

fn max_abs(samples: &[f32]) -> f64 {
    samples.iter().fold(0.0f64, |acc, &s| acc.max(s.abs() as f64))
}
