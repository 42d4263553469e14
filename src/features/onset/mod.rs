//! Onset detection modules
//!
//! Estimates when a short clip becomes audible, and how severe the resulting
//! delay is for a hit sound.

pub mod delay;
