//! Vehicle recommendation
//!
//! A linear scan over the profile's class ladder, ordered smallest to
//! largest so the choice is auditable. Capacity is advisory for pricing:
//! a load that exceeds every class still prices against the largest one.

use vanward_common::{PricingInput, RateProfile, Result, VanwardError, VehicleClass};

use crate::decimal_from_f64;

/// Pick the smallest vehicle class whose weight AND volume capacity both
/// cover the job's totals; falls back to the largest class on overflow
pub fn recommend_vehicle<'a>(
    input: &PricingInput,
    profile: &'a RateProfile,
) -> Result<&'a VehicleClass> {
    let weight = decimal_from_f64("total_weight_kg", input.total_weight_kg())?;
    let volume = decimal_from_f64("total_volume_m3", input.total_volume_m3())?;

    profile
        .vehicle_classes
        .iter()
        .find(|class| class.fits(weight, volume))
        .or_else(|| profile.largest_vehicle())
        .ok_or_else(|| VanwardError::Config("rate profile has no vehicle classes".to_string()))
}
