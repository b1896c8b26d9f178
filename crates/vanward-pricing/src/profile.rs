//! Rate profile resolver
//!
//! The single point where the two pricing postures diverge. `standard`
//! charges for the return leg (x1.4) and higher tier rates with 20% VAT
//! when enabled; `competitive` prices one-way at roughly 30% lower rates
//! and always quotes VAT-free, overriding the global VAT flag.
//!
//! Tier boundaries, surcharge amounts, demand tables, and the vehicle
//! ladder are identical across profiles; only the per-mile rates, the
//! round-trip multiplier, and the VAT posture change.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use vanward_common::{
    BaseFees, DemandTables, DistanceTier, InsuranceFees, RateProfile, RateProfileId, VehicleClass,
};

/// Resolve a fully populated rate profile
///
/// Pure and side-effect free. `enable_vat` is the platform-level VAT
/// toggle; the competitive profile forces VAT off regardless.
pub fn resolve_profile(id: RateProfileId, enable_vat: bool) -> RateProfile {
    match id {
        RateProfileId::Standard => standard_profile(enable_vat),
        RateProfileId::Competitive => competitive_profile(),
    }
}

fn standard_profile(enable_vat: bool) -> RateProfile {
    RateProfile {
        id: RateProfileId::Standard,
        distance_tiers: vec![
            DistanceTier::new(dec!(10), dec!(4.00)),
            DistanceTier::new(dec!(30), dec!(2.90)),
            DistanceTier::new(dec!(60), dec!(2.25)),
            DistanceTier::new(dec!(120), dec!(1.75)),
        ],
        round_trip_multiplier: dec!(1.4),
        vat_enabled: enable_vat,
        vat_rate: dec!(0.20),
        ..shared_constants(RateProfileId::Standard)
    }
}

fn competitive_profile() -> RateProfile {
    RateProfile {
        id: RateProfileId::Competitive,
        distance_tiers: vec![
            DistanceTier::new(dec!(10), dec!(2.80)),
            DistanceTier::new(dec!(30), dec!(2.00)),
            DistanceTier::new(dec!(60), dec!(1.50)),
            DistanceTier::new(dec!(120), dec!(1.20)),
        ],
        round_trip_multiplier: dec!(1.0),
        // Competitive quotes are always VAT-free
        vat_enabled: false,
        vat_rate: Decimal::ZERO,
        ..shared_constants(RateProfileId::Competitive)
    }
}

/// Constants shared by both postures
fn shared_constants(id: RateProfileId) -> RateProfile {
    RateProfile {
        id,
        base_fees: BaseFees {
            single_item: dec!(40),
            house_move: dec!(90),
            office_move: dec!(130),
        },
        distance_tiers: Vec::new(),
        round_trip_multiplier: dec!(1.0),
        // Load is priced through the vehicle class multiplier; the per-unit
        // rates stay configurable for bespoke profiles
        per_kg_rate: Decimal::ZERO,
        per_m3_rate: Decimal::ZERO,
        floor_rate_per_level: dec!(15),
        packaging_fee: dec!(30),
        assembly_fee: dec!(25),
        disassembly_fee: dec!(20),
        cleaning_fee: dec!(40),
        insurance_fees: InsuranceFees {
            standard: dec!(15),
            premium: dec!(35),
        },
        vat_enabled: false,
        vat_rate: Decimal::ZERO,
        vehicle_classes: vec![
            VehicleClass::new("Small van", dec!(400), dec!(5), dec!(1.00)),
            VehicleClass::new("Medium van", dec!(800), dec!(9), dec!(1.10)),
            VehicleClass::new("LWB van", dec!(1100), dec!(13), dec!(1.20)),
            VehicleClass::new("Luton van", dec!(1500), dec!(19), dec!(1.35)),
        ],
        demand: DemandTables {
            weekday_factor: dec!(1.00),
            saturday_factor: dec!(1.15),
            sunday_factor: dec!(1.10),
            month_factors: [
                dec!(0.90), // Jan
                dec!(0.90), // Feb
                dec!(0.95), // Mar
                dec!(1.00), // Apr
                dec!(1.05), // May
                dec!(1.10), // Jun
                dec!(1.15), // Jul
                dec!(1.15), // Aug
                dec!(1.05), // Sep
                dec!(1.00), // Oct
                dec!(0.95), // Nov
                dec!(0.90), // Dec
            ],
            urgent_factor: dec!(1.25),
            short_lead_factor: dec!(1.05),
            early_booking_factor: dec!(0.95),
            short_lead_days: 2,
            normal_lead_days: 7,
            early_lead_days: 28,
            floor: dec!(0.85),
            ceiling: dec!(1.75),
        },
        band_fraction: dec!(0.15),
        band_increment: dec!(5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_charges_round_trip() {
        let profile = resolve_profile(RateProfileId::Standard, true);
        assert_eq!(profile.round_trip_multiplier, dec!(1.4));
        assert!(profile.vat_enabled);
        assert_eq!(profile.effective_vat_rate(), dec!(0.20));
    }

    #[test]
    fn test_standard_respects_vat_toggle() {
        let profile = resolve_profile(RateProfileId::Standard, false);
        assert!(!profile.vat_enabled);
        assert_eq!(profile.effective_vat_rate(), Decimal::ZERO);
    }

    #[test]
    fn test_competitive_overrides_vat() {
        // The global VAT flag must not re-enable VAT on competitive quotes
        let profile = resolve_profile(RateProfileId::Competitive, true);
        assert!(!profile.vat_enabled);
        assert_eq!(profile.effective_vat_rate(), Decimal::ZERO);
        assert_eq!(profile.round_trip_multiplier, dec!(1.0));
    }

    #[test]
    fn test_tier_boundaries_match_across_profiles() {
        let standard = resolve_profile(RateProfileId::Standard, true);
        let competitive = resolve_profile(RateProfileId::Competitive, true);

        assert_eq!(standard.distance_tiers.len(), competitive.distance_tiers.len());
        for (s, c) in standard
            .distance_tiers
            .iter()
            .zip(competitive.distance_tiers.iter())
        {
            assert_eq!(s.threshold_miles, c.threshold_miles);
            assert!(s.rate_per_mile > c.rate_per_mile);
        }
    }

    #[test]
    fn test_vehicle_ladder_ordered_smallest_first() {
        let profile = resolve_profile(RateProfileId::Standard, true);
        let classes = &profile.vehicle_classes;
        assert!(!classes.is_empty());
        for pair in classes.windows(2) {
            assert!(pair[0].max_weight_kg < pair[1].max_weight_kg);
            assert!(pair[0].max_volume_m3 < pair[1].max_volume_m3);
            assert!(pair[0].multiplier <= pair[1].multiplier);
        }
        assert_eq!(classes[0].multiplier, dec!(1.00));
    }

    #[test]
    fn test_month_factor_table_covers_year() {
        let profile = resolve_profile(RateProfileId::Standard, true);
        for factor in profile.demand.month_factors.iter() {
            assert!(*factor >= profile.demand.floor);
            assert!(*factor <= profile.demand.ceiling);
        }
    }
}
