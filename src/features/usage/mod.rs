//! Hit sound usage modules
//!
//! - Frequency tracking (use counts and the moment of densest use)
//! - Dominant-user selection (which map uses a hit sound habitually)
//! - Timestamp formatting

pub mod common_usage;
pub mod frequency;
pub mod timestamp;
