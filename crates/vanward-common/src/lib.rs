//! # Vanward Common
//!
//! Shared types, errors, and audit events for the Vanward removals
//! marketplace.
//!
//! ## Core Types
//!
//! - [`PricingInput`]: job description consumed by the pricing engine
//! - [`RateProfile`]: named bundle of pricing constants (`standard` |
//!   `competitive`)
//! - [`PriceBreakdown`]: itemized, immutable calculation result
//! - [`PriceEstimate`]: quote wrapper with identity and validity window
//! - [`PriceAuditEvent`]: estimate/reprice audit trail entries
//!
//! The calculation itself lives in `vanward-pricing`; this crate carries
//! the data model those calculations consume and produce.

pub mod audit;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use audit::{AuditSink, ConsoleAuditSink, MemoryAuditSink, PriceAuditAction, PriceAuditEvent, PriceAuditLog};
pub use error::{PricingError, Result, VanwardError};
pub use types::{
    breakdown::{PriceBreakdown, PriceEstimate, RepriceOutcome},
    job::{InsuranceLevel, JobItem, JobType, PricingInput},
    rate_profile::{
        BaseFees, DemandTables, DistanceTier, InsuranceFees, RateProfile, RateProfileId,
        VehicleClass,
    },
};

/// Vanward version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Currency every price is denominated in (UK-only platform)
pub const CURRENCY: &str = "GBP";

/// Target pricing calculation latency in milliseconds
pub const TARGET_PRICING_LATENCY_MS: u64 = 10;
