//! Rate profile - the configuration side of a price calculation
//!
//! A profile is a named bundle of pricing constants: base fees, cumulative
//! distance tiers, surcharge amounts, demand tables, and the vehicle class
//! ladder. The two built-in postures (`standard` | `competitive`) are plain
//! data records resolved by `vanward-pricing`; the arithmetic path never
//! branches on the profile name.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::job::{InsuranceLevel, JobType};

/// Identifier of a built-in rate profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateProfileId {
    Standard,
    Competitive,
}

impl Default for RateProfileId {
    fn default() -> Self {
        RateProfileId::Standard
    }
}

impl fmt::Display for RateProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateProfileId::Standard => write!(f, "standard"),
            RateProfileId::Competitive => write!(f, "competitive"),
        }
    }
}

impl FromStr for RateProfileId {
    type Err = std::convert::Infallible;

    /// Unknown identifiers fall back to `standard`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "competitive" => RateProfileId::Competitive,
            _ => RateProfileId::Standard,
        })
    }
}

/// One cumulative distance tier
///
/// `threshold_miles` is the cumulative upper bound covered by this tier;
/// miles beyond the last threshold are charged at the last tier's rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceTier {
    pub threshold_miles: Decimal,
    pub rate_per_mile: Decimal,
}

impl DistanceTier {
    pub fn new(threshold_miles: Decimal, rate_per_mile: Decimal) -> Self {
        Self {
            threshold_miles,
            rate_per_mile,
        }
    }
}

/// Base fee per job category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseFees {
    pub single_item: Decimal,
    pub house_move: Decimal,
    pub office_move: Decimal,
}

impl BaseFees {
    pub fn for_job(&self, job_type: JobType) -> Decimal {
        match job_type {
            JobType::SingleItem => self.single_item,
            JobType::HouseMove => self.house_move,
            JobType::OfficeMove => self.office_move,
        }
    }
}

/// Flat insurance surcharge per cover level; basic cover is included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceFees {
    pub standard: Decimal,
    pub premium: Decimal,
}

impl InsuranceFees {
    pub fn for_level(&self, level: InsuranceLevel) -> Decimal {
        match level {
            InsuranceLevel::Basic => Decimal::ZERO,
            InsuranceLevel::Standard => self.standard,
            InsuranceLevel::Premium => self.premium,
        }
    }
}

/// A van size category with capacity limits and a price multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleClass {
    /// Display label (e.g. "Luton van")
    pub name: String,
    /// Maximum payload in kilograms
    pub max_weight_kg: Decimal,
    /// Maximum load volume in cubic metres
    pub max_volume_m3: Decimal,
    /// Price multiplier applied to the subtotal, >= 1.0
    pub multiplier: Decimal,
}

impl VehicleClass {
    pub fn new(
        name: impl Into<String>,
        max_weight_kg: Decimal,
        max_volume_m3: Decimal,
        multiplier: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            max_weight_kg,
            max_volume_m3,
            multiplier,
        }
    }

    /// Whether both capacity limits cover the given load
    pub fn fits(&self, weight_kg: Decimal, volume_m3: Decimal) -> bool {
        self.max_weight_kg >= weight_kg && self.max_volume_m3 >= volume_m3
    }
}

/// Demand multiplier tables
///
/// The three factors (day-of-week, month season, lead time) combine by
/// multiplication and the product is clamped to `[floor, ceiling]`. The
/// numeric factors are tunable data; the combination rule is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandTables {
    /// Monday-Friday factor
    pub weekday_factor: Decimal,
    pub saturday_factor: Decimal,
    pub sunday_factor: Decimal,

    /// Seasonality factor per calendar month, January first
    pub month_factors: [Decimal; 12],

    /// Lead time below `short_lead_days` -> urgency premium
    pub urgent_factor: Decimal,
    /// Lead time in `short_lead_days..normal_lead_days`
    pub short_lead_factor: Decimal,
    /// Lead time at or beyond `early_lead_days` -> early-booking discount
    pub early_booking_factor: Decimal,

    pub short_lead_days: i64,
    pub normal_lead_days: i64,
    pub early_lead_days: i64,

    /// Lower clamp on the combined multiplier
    pub floor: Decimal,
    /// Upper clamp on the combined multiplier
    pub ceiling: Decimal,
}

/// A fully resolved bundle of pricing constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateProfile {
    pub id: RateProfileId,

    pub base_fees: BaseFees,

    /// Ordered cumulative distance tiers, nearest first
    pub distance_tiers: Vec<DistanceTier>,

    /// 1.0 = one-way pricing; >1.0 charges for the return leg
    pub round_trip_multiplier: Decimal,

    /// Load rates; the built-in profiles carry zero here and price load
    /// through the vehicle class multiplier instead
    pub per_kg_rate: Decimal,
    pub per_m3_rate: Decimal,

    /// Surcharge per floor per side without an elevator
    pub floor_rate_per_level: Decimal,

    pub packaging_fee: Decimal,
    pub assembly_fee: Decimal,
    pub disassembly_fee: Decimal,
    pub cleaning_fee: Decimal,

    pub insurance_fees: InsuranceFees,

    /// VAT applied to the subtotal when enabled
    pub vat_enabled: bool,
    pub vat_rate: Decimal,

    /// Ordered smallest-to-largest by capacity
    pub vehicle_classes: Vec<VehicleClass>,

    pub demand: DemandTables,

    /// Half-width of the display price band as a fraction of the total
    pub band_fraction: Decimal,
    /// Display bounds are rounded to this increment (e.g. nearest 5 GBP)
    pub band_increment: Decimal,
}

impl RateProfile {
    /// Effective VAT rate: zero when VAT is disabled for this profile
    pub fn effective_vat_rate(&self) -> Decimal {
        if self.vat_enabled {
            self.vat_rate
        } else {
            Decimal::ZERO
        }
    }

    /// The largest vehicle class, used as the overflow fallback
    pub fn largest_vehicle(&self) -> Option<&VehicleClass> {
        self.vehicle_classes.last()
    }
}
