//! Audio I/O modules
//!
//! WAVE header validation and audio decoding using Symphonia.

pub mod clip;
pub mod decoder;
pub mod wav_header;
