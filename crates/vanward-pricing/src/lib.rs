//! # Vanward Pricing
//!
//! Deterministic pricing engine for the Vanward removals marketplace.
//!
//! ## Formula
//!
//! ```text
//! subtotal = round((base + distance + load + floors + extras)
//!                  x demand x vehicle, 2)
//! total    = subtotal + vat
//! ```
//!
//! Where:
//! - base: flat fee per job category
//! - distance: cumulative tiered mileage cost x round-trip multiplier
//! - load/floors/extras: weight-volume, stair-carry, and service surcharges
//! - demand: day-of-week x season x lead-time, clamped
//! - vehicle: multiplier of the recommended van class
//! - vat: round(subtotal x vat_rate, 2) when the resolved profile has VAT on
//!
//! The calculation is a pure, synchronous function of its input and the
//! resolved [`RateProfile`](vanward_common::RateProfile); callers may invoke
//! it concurrently without coordination. The quote engine, cache, and
//! settings loader around it are optional caller conveniences.

pub mod cache;
pub mod demand;
pub mod distance;
pub mod engine;
pub mod profile;
pub mod settings;
pub mod surcharge;
pub mod vehicle;

pub use cache::QuoteCache;
pub use engine::{calculate_price, PricingEngine, PricingOptions};
pub use profile::resolve_profile;
pub use settings::PricingSettings;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use vanward_common::{PricingError, Result};

/// Round a money amount to 2 decimal places, midpoint away from zero
pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a caller-supplied f64 into Decimal, rejecting values the money
/// type cannot represent
pub(crate) fn decimal_from_f64(field: &'static str, value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(PricingError::NonFiniteValue { field, value }.into());
    }
    Decimal::from_f64(value).ok_or_else(|| PricingError::OutOfRange { field, value }.into())
}
