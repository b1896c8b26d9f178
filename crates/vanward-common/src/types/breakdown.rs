//! Price breakdown and quote types - the output side of a calculation
//!
//! A `PriceBreakdown` is computed fresh on demand and never mutated; an
//! admin reprice produces a brand-new breakdown and the caller retains the
//! old one in its audit trail. Invariants:
//!
//! ```text
//! subtotal    = round((base + distance + load + floors + extras)
//!                     x demand_multiplier x vehicle_multiplier, 2)
//! vat_amount  = round(subtotal x vat_rate, 2)
//! total_price = subtotal + vat_amount
//! price_min <= total_price <= price_max
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::rate_profile::RateProfileId;

/// Itemized result of a price calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Flat fee for the job category
    pub base_price: Decimal,

    /// Tiered mileage cost including the round-trip multiplier
    pub distance_cost: Decimal,

    /// Per-kg / per-m3 load cost (zero under the built-in profiles)
    pub weight_volume_cost: Decimal,

    /// Stair-carry surcharge across both sides
    pub floor_cost: Decimal,

    /// Packing, assembly, disassembly, cleaning, and insurance surcharges
    pub extra_services: Decimal,

    /// Combined day-of-week x season x lead-time factor, clamped
    pub demand_multiplier: Decimal,

    /// Multiplier of the recommended vehicle class
    pub vehicle_multiplier: Decimal,

    /// Label of the recommended vehicle class
    pub recommended_vehicle: String,

    /// Pre-VAT price, rounded to 2 decimal places
    pub subtotal: Decimal,

    /// Zero when VAT is disabled for the resolved profile
    pub vat_amount: Decimal,

    /// The billable amount: subtotal + vat_amount
    pub total_price: Decimal,

    /// Lower display bound; cosmetic only, never billed
    pub price_min: Decimal,

    /// Upper display bound; cosmetic only, never billed
    pub price_max: Decimal,

    /// Profile the calculation was resolved against, kept for audit
    pub profile: RateProfileId,
}

impl PriceBreakdown {
    /// Whether VAT was applied to this breakdown
    pub fn vat_applied(&self) -> bool {
        !self.vat_amount.is_zero()
    }

    /// Sum of the additive components before multipliers
    pub fn component_sum(&self) -> Decimal {
        self.base_price
            + self.distance_cost
            + self.weight_volume_cost
            + self.floor_cost
            + self.extra_services
    }
}

/// A customer- or admin-facing quote wrapping a breakdown
///
/// The breakdown is deterministic for identical input; identity and clock
/// live only in this wrapper so quotes can be cached and expired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceEstimate {
    /// Unique quote identifier
    pub quote_id: Uuid,

    /// The deterministic calculation result
    pub breakdown: PriceBreakdown,

    /// ISO currency code
    pub currency: String,

    /// Quote validity period in milliseconds
    pub valid_for_ms: u64,

    /// Expiration timestamp (Unix millis)
    pub expires_at: i64,

    /// Calculation timestamp (Unix millis)
    pub computed_at: i64,
}

impl PriceEstimate {
    /// Default quote validity period (30 minutes)
    pub const DEFAULT_VALIDITY_MS: u64 = 30 * 60 * 1000;

    /// Check if the quote is still valid
    pub fn is_valid(&self) -> bool {
        chrono::Utc::now().timestamp_millis() < self.expires_at
    }
}

/// Result of an admin reprice against a previously stored breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepriceOutcome {
    /// Total of the stored breakdown being replaced
    pub previous_total: Decimal,

    /// Total of the fresh calculation
    pub new_total: Decimal,

    /// new_total - previous_total; negative when the price went down
    pub delta: Decimal,

    /// The replacement breakdown
    pub breakdown: PriceBreakdown,
}

impl RepriceOutcome {
    pub fn new(previous_total: Decimal, breakdown: PriceBreakdown) -> Self {
        let new_total = breakdown.total_price;
        Self {
            previous_total,
            new_total,
            delta: new_total - previous_total,
            breakdown,
        }
    }

    /// Whether the reprice changed the billable amount
    pub fn changed(&self) -> bool {
        !self.delta.is_zero()
    }
}
