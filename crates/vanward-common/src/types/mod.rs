//! Core data types for the Vanward marketplace

pub mod breakdown;
pub mod job;
pub mod rate_profile;
