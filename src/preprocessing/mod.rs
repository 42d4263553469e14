//! Audio preprocessing modules
//!
//! This module contains utilities for preparing clips for onset analysis:
//! - Channel mixing (stereo to a mono amplitude envelope)
//! - Silence detection

pub mod channel_mixer;
pub mod silence;
