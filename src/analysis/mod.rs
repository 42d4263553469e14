//! Checks and result aggregation
//!
//! - Delay check (onset delay per hit sound)
//! - Usage check (frequency peak and common user per hit sound)
//! - Report and result types
//! - Metadata

pub mod delay_check;
pub mod metadata;
pub mod report;
pub mod result;
pub mod usage_check;
