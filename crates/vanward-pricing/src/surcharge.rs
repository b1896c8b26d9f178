//! Load and surcharge calculation
//!
//! Three additive components: per-item weight/volume cost, stair-carry
//! surcharges for floors without an elevator, and flat once-per-job fees
//! for the optional services plus the insurance level.

use rust_decimal::Decimal;
use vanward_common::{PricingInput, RateProfile, Result};

use crate::{decimal_from_f64, round2};

/// Sum of per-item load costs: quantity x weight x rate + quantity x volume x rate
///
/// The built-in profiles carry zero per-unit rates (load is priced through
/// the vehicle class); bespoke profiles may set them.
pub fn weight_volume_cost(input: &PricingInput, profile: &RateProfile) -> Result<Decimal> {
    let mut cost = Decimal::ZERO;
    for item in &input.items {
        let quantity = Decimal::from(item.quantity);
        let weight = decimal_from_f64("weight_kg", item.weight_kg)?;
        let volume = decimal_from_f64("volume_m3", item.volume_m3)?;
        cost += quantity * weight * profile.per_kg_rate;
        cost += quantity * volume * profile.per_m3_rate;
    }
    Ok(round2(cost))
}

/// Stair-carry surcharge: rate x floor count per side, unless that side
/// has an elevator
pub fn floor_cost(input: &PricingInput, profile: &RateProfile) -> Decimal {
    let mut floors = Decimal::ZERO;
    if !input.pickup_has_elevator {
        floors += Decimal::from(input.pickup_floor);
    }
    if !input.delivery_has_elevator {
        floors += Decimal::from(input.delivery_floor);
    }
    round2(floors * profile.floor_rate_per_level)
}

/// Flat service surcharges plus the insurance fee
///
/// Each flag adds its fee once per job, never scaled by item count.
pub fn extra_services_cost(input: &PricingInput, profile: &RateProfile) -> Decimal {
    let mut cost = Decimal::ZERO;
    if input.requires_packaging {
        cost += profile.packaging_fee;
    }
    if input.requires_assembly {
        cost += profile.assembly_fee;
    }
    if input.requires_disassembly {
        cost += profile.disassembly_fee;
    }
    if input.requires_cleaning {
        cost += profile.cleaning_fee;
    }
    cost += profile.insurance_fees.for_level(input.insurance_level);
    round2(cost)
}
