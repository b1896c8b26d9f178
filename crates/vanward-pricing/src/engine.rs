//! Price calculation and the quote engine around it
//!
//! [`calculate_price`] is the pure entry point: no clock, no identity, no
//! I/O. Identical input and options produce an identical breakdown.
//! [`PricingEngine`] wraps it for callers that want quotes with identity
//! and a validity window, cached lookups, repricing, and audit events.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;
use vanward_common::{
    PriceAuditLog, PriceBreakdown, PriceEstimate, PricingInput, RateProfile, RateProfileId,
    RepriceOutcome, Result, CURRENCY,
};

use crate::cache::QuoteCache;
use crate::demand::demand_multiplier;
use crate::distance::distance_cost;
use crate::profile::resolve_profile;
use crate::round2;
use crate::surcharge::{extra_services_cost, floor_cost, weight_volume_cost};
use crate::vehicle::recommend_vehicle;

/// Caller-supplied calculation options
///
/// Callers pass the platform-level profile name and VAT toggle explicitly;
/// the calculator never reads process configuration itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PricingOptions {
    pub profile: RateProfileId,
    pub enable_vat: bool,
}

impl PricingOptions {
    pub fn new(profile: RateProfileId, enable_vat: bool) -> Self {
        Self {
            profile,
            enable_vat,
        }
    }
}

impl Default for PricingOptions {
    fn default() -> Self {
        Self {
            profile: RateProfileId::Standard,
            enable_vat: true,
        }
    }
}

/// Calculate a price breakdown for a job
///
/// Never fails on out-of-range business values; only structurally invalid
/// input (non-finite numbers) is rejected, immediately and without partial
/// computation.
pub fn calculate_price(input: &PricingInput, options: &PricingOptions) -> Result<PriceBreakdown> {
    input.validate()?;

    let profile = resolve_profile(options.profile, options.enable_vat);

    let base_price = profile.base_fees.for_job(input.job_type);
    let distance = distance_cost(input.distance_miles, &profile)?;
    let weight_volume = weight_volume_cost(input, &profile)?;
    let floors = floor_cost(input, &profile);
    let extras = extra_services_cost(input, &profile);
    let demand = demand_multiplier(input, &profile.demand);
    let vehicle = recommend_vehicle(input, &profile)?;

    debug!(
        %base_price,
        %distance,
        %weight_volume,
        %floors,
        %extras,
        %demand,
        vehicle = %vehicle.name,
        "price components"
    );

    // Multiplicative stages run at full Decimal precision; the single
    // rounding into subtotal is the one the invariant is stated against
    let component_sum = base_price + distance + weight_volume + floors + extras;
    let subtotal = round2(component_sum * demand * vehicle.multiplier);
    let vat_amount = round2(subtotal * profile.effective_vat_rate());
    let total_price = subtotal + vat_amount;
    let (price_min, price_max) = display_band(total_price, &profile);

    Ok(PriceBreakdown {
        base_price,
        distance_cost: distance,
        weight_volume_cost: weight_volume,
        floor_cost: floors,
        extra_services: extras,
        demand_multiplier: demand,
        vehicle_multiplier: vehicle.multiplier,
        recommended_vehicle: vehicle.name.clone(),
        subtotal,
        vat_amount,
        total_price,
        price_min,
        price_max,
        profile: profile.id,
    })
}

/// Customer-facing display band around the billable total
///
/// Cosmetic only. The bounds are snapped to the profile's display
/// increment but must never exclude the total itself.
fn display_band(total: Decimal, profile: &RateProfile) -> (Decimal, Decimal) {
    let delta = total * profile.band_fraction;
    let min = round_to_increment(total - delta, profile.band_increment).min(total);
    let max = round_to_increment(total + delta, profile.band_increment).max(total);
    (min, max)
}

fn round_to_increment(value: Decimal, increment: Decimal) -> Decimal {
    if increment <= Decimal::ZERO {
        return round2(value);
    }
    (value / increment).round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        * increment
}

/// Quote engine for callers that need identified, expiring estimates
///
/// Construction is cheap; clone-free sharing across request handlers works
/// because every method takes `&self` and the wrapped calculator is pure.
pub struct PricingEngine {
    options: PricingOptions,
    valid_for_ms: u64,
    cache: Option<QuoteCache>,
    audit: Option<Arc<PriceAuditLog>>,
}

impl PricingEngine {
    /// Create an engine with no cache and no audit log
    pub fn new(options: PricingOptions) -> Self {
        Self {
            options,
            valid_for_ms: PriceEstimate::DEFAULT_VALIDITY_MS,
            cache: None,
            audit: None,
        }
    }

    /// Attach a quote cache
    pub fn with_cache(mut self, cache: QuoteCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Attach an audit log; estimates and reprices are recorded on it
    pub fn with_audit(mut self, audit: Arc<PriceAuditLog>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Override the quote validity window
    pub fn with_validity_ms(mut self, valid_for_ms: u64) -> Self {
        self.valid_for_ms = valid_for_ms;
        self
    }

    /// The options this engine calculates under
    pub fn options(&self) -> &PricingOptions {
        &self.options
    }

    /// Produce an identified quote, consulting the cache when attached
    #[instrument(skip(self, input))]
    pub fn quote(&self, input: &PricingInput) -> Result<PriceEstimate> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(input, &self.options)? {
                debug!(quote = %hit.quote_id, "quote cache hit");
                return Ok(hit);
            }
        }

        let breakdown = calculate_price(input, &self.options)?;
        let now = Utc::now().timestamp_millis();
        let estimate = PriceEstimate {
            quote_id: Uuid::new_v4(),
            breakdown,
            currency: CURRENCY.to_string(),
            valid_for_ms: self.valid_for_ms,
            expires_at: now + self.valid_for_ms as i64,
            computed_at: now,
        };

        if let Some(cache) = &self.cache {
            cache.set(input, &self.options, &estimate)?;
        }
        if let Some(audit) = &self.audit {
            audit.log_estimate(
                estimate.quote_id,
                estimate.breakdown.total_price,
                estimate.breakdown.profile,
            );
        }

        Ok(estimate)
    }

    /// Recompute a stored booking's price under the current options
    ///
    /// Always calculates fresh (never served from cache) so the admin sees
    /// the engine's current view; the caller replaces the stored breakdown
    /// and keeps the old one in its own audit trail.
    #[instrument(skip(self, input, previous))]
    pub fn reprice(
        &self,
        input: &PricingInput,
        previous: &PriceBreakdown,
        booking_ref: Option<&str>,
        actor: Option<&str>,
    ) -> Result<RepriceOutcome> {
        let breakdown = calculate_price(input, &self.options)?;
        let outcome = RepriceOutcome::new(previous.total_price, breakdown);

        debug!(
            previous = %outcome.previous_total,
            new = %outcome.new_total,
            delta = %outcome.delta,
            "reprice"
        );

        if let Some(audit) = &self.audit {
            audit.log_reprice(
                booking_ref,
                outcome.previous_total,
                outcome.new_total,
                outcome.breakdown.profile,
                actor,
            );
        }

        Ok(outcome)
    }
}
