//! Error types for the Vanward platform
//!
//! Provides a unified error type and domain-specific error variants

use thiserror::Error;

/// Result type alias using VanwardError
pub type Result<T> = std::result::Result<T, VanwardError>;

/// Unified error type for Vanward operations
#[derive(Debug, Error)]
pub enum VanwardError {
    // Pricing errors
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Pricing calculation errors
///
/// Only structurally invalid input is an error; out-of-range business
/// values (negative distance, empty items, unknown enum strings) resolve
/// to documented defaults instead.
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Non-finite value for {field}: {value}")]
    NonFiniteValue { field: &'static str, value: f64 },

    #[error("Value for {field} exceeds representable range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("Price quote expired")]
    QuoteExpired,

    #[error("Pricing calculation overflow")]
    Overflow,
}

// Implement From for common external error types
impl From<serde_json::Error> for VanwardError {
    fn from(err: serde_json::Error) -> Self {
        VanwardError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for VanwardError {
    fn from(err: std::io::Error) -> Self {
        VanwardError::Internal(err.to_string())
    }
}
