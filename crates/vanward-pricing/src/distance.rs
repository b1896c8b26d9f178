//! Distance cost calculation
//!
//! Walks the profile's cumulative tiers nearest-first, consuming each
//! tier's mile allowance from the remaining distance; miles beyond the
//! last threshold stay on the last tier's rate. The accumulated one-way
//! cost is multiplied by the profile's round-trip multiplier.

use rust_decimal::Decimal;
use vanward_common::{RateProfile, Result};

use crate::{decimal_from_f64, round2};

/// Tiered mileage cost including the round-trip multiplier, rounded to 2dp
///
/// Zero or negative distance is a same-location job and costs nothing.
/// There is no upper bound; absurd distances scale linearly past the final
/// tier.
pub fn distance_cost(distance_miles: f64, profile: &RateProfile) -> Result<Decimal> {
    if distance_miles <= 0.0 {
        return Ok(Decimal::ZERO);
    }

    let mut remaining = decimal_from_f64("distance_miles", distance_miles)?;
    let mut covered = Decimal::ZERO;
    let mut last_rate = Decimal::ZERO;
    let mut one_way = Decimal::ZERO;

    for tier in &profile.distance_tiers {
        let allowance = (tier.threshold_miles - covered).max(Decimal::ZERO);
        let consumed = remaining.min(allowance);
        one_way += consumed * tier.rate_per_mile;
        remaining -= consumed;
        covered = tier.threshold_miles;
        last_rate = tier.rate_per_mile;
        if remaining.is_zero() {
            break;
        }
    }

    // Remainder beyond the last threshold stays on the last rate
    if remaining > Decimal::ZERO {
        one_way += remaining * last_rate;
    }

    Ok(round2(one_way * profile.round_trip_multiplier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::resolve_profile;
    use rust_decimal_macros::dec;
    use vanward_common::RateProfileId;

    #[test]
    fn test_zero_and_negative_distance_cost_nothing() {
        let profile = resolve_profile(RateProfileId::Standard, true);
        assert_eq!(distance_cost(0.0, &profile).unwrap(), Decimal::ZERO);
        assert_eq!(distance_cost(-3.5, &profile).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_within_first_tier() {
        let profile = resolve_profile(RateProfileId::Standard, true);
        // 5 mi x 4.00 = 20.00, x1.4 round trip = 28.00
        assert_eq!(distance_cost(5.0, &profile).unwrap(), dec!(28.00));
    }

    #[test]
    fn test_spans_all_tiers_standard() {
        let profile = resolve_profile(RateProfileId::Standard, true);
        // 10x4.00 + 20x2.90 + 30x2.25 + 39x1.75 = 233.75, x1.4 = 327.25
        assert_eq!(distance_cost(99.0, &profile).unwrap(), dec!(327.25));
    }

    #[test]
    fn test_spans_all_tiers_competitive() {
        let profile = resolve_profile(RateProfileId::Competitive, true);
        // 10x2.80 + 20x2.00 + 30x1.50 + 39x1.20 = 159.80, one-way pricing
        assert_eq!(distance_cost(99.0, &profile).unwrap(), dec!(159.80));
    }

    #[test]
    fn test_beyond_last_threshold_uses_last_rate() {
        let profile = resolve_profile(RateProfileId::Standard, true);
        // 10x4.00 + 20x2.90 + 30x2.25 + 60x1.75 + 30x1.75 = 323.00, x1.4
        assert_eq!(distance_cost(150.0, &profile).unwrap(), dec!(452.20));
    }

    #[test]
    fn test_monotonic_in_distance() {
        let profile = resolve_profile(RateProfileId::Standard, true);
        let mut previous = Decimal::ZERO;
        for miles in [0.0, 1.0, 9.9, 10.0, 10.1, 29.0, 61.0, 119.9, 120.0, 500.0] {
            let cost = distance_cost(miles, &profile).unwrap();
            assert!(cost >= previous, "cost fell at {miles} miles");
            previous = cost;
        }
    }

    #[test]
    fn test_fractional_miles() {
        let profile = resolve_profile(RateProfileId::Competitive, true);
        // 2.5 mi x 2.80 = 7.00
        assert_eq!(distance_cost(2.5, &profile).unwrap(), dec!(7.00));
    }

    #[test]
    fn test_non_finite_distance_rejected() {
        let profile = resolve_profile(RateProfileId::Standard, true);
        assert!(distance_cost(f64::NAN, &profile).is_err());
    }
}
