//! Feature extraction modules
//!
//! This module contains the analysis algorithms:
//! - Onset delay estimation
//! - Usage frequency and dominant-user selection

pub mod onset;
pub mod usage;
