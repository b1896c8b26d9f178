//! Job description types - the input side of a price calculation
//!
//! A `PricingInput` is assembled by callers (booking draft, admin reprice,
//! recalculation endpoint) from persisted job and item rows. It is immutable
//! for the duration of a calculation and carries everything the calculator
//! needs: distance, load, access conditions, service flags, and timing.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};

/// Job category, affects the base fee only
///
/// Unknown category strings from persisted rows fall back to a single-item
/// job rather than failing the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum JobType {
    /// One or a few standalone items
    SingleItem,
    /// Full household relocation
    HouseMove,
    /// Commercial office relocation
    OfficeMove,
}

impl Default for JobType {
    fn default() -> Self {
        JobType::SingleItem
    }
}

impl FromStr for JobType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "house_move" => JobType::HouseMove,
            "office_move" => JobType::OfficeMove,
            _ => JobType::SingleItem,
        })
    }
}

impl From<String> for JobType {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

/// Insurance cover levels
///
/// Unknown level strings resolve to basic cover, which carries no
/// surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum InsuranceLevel {
    /// Included cover, no surcharge
    Basic,
    /// Extended cover
    Standard,
    /// Full replacement cover
    Premium,
}

impl Default for InsuranceLevel {
    fn default() -> Self {
        InsuranceLevel::Basic
    }
}

impl FromStr for InsuranceLevel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "standard" => InsuranceLevel::Standard,
            "premium" => InsuranceLevel::Premium,
            _ => InsuranceLevel::Basic,
        })
    }
}

impl From<String> for InsuranceLevel {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

/// A single line item being moved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobItem {
    /// Display name (e.g. "Washing machine")
    pub name: String,
    /// Number of identical units
    pub quantity: u32,
    /// Weight per unit in kilograms
    pub weight_kg: f64,
    /// Volume per unit in cubic metres
    pub volume_m3: f64,
}

impl JobItem {
    pub fn new(name: impl Into<String>, quantity: u32, weight_kg: f64, volume_m3: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            weight_kg,
            volume_m3,
        }
    }
}

/// Input for a price calculation
///
/// Distances are one-way driving miles. Floors count storeys above ground
/// (0 = ground); an elevator on a side suppresses that side's floor
/// surcharge. Service flags each add a flat once-per-job surcharge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    /// Job category
    pub job_type: JobType,

    /// One-way driving distance in miles
    pub distance_miles: f64,

    /// Items being moved; an empty list is a valid job
    pub items: Vec<JobItem>,

    /// Pickup floor (0 = ground)
    pub pickup_floor: u32,

    /// Delivery floor (0 = ground)
    pub delivery_floor: u32,

    /// Elevator available at pickup
    pub pickup_has_elevator: bool,

    /// Elevator available at delivery
    pub delivery_has_elevator: bool,

    /// Packing materials and packing service requested
    pub requires_packaging: bool,

    /// Furniture assembly at delivery requested
    pub requires_assembly: bool,

    /// Furniture disassembly at pickup requested
    pub requires_disassembly: bool,

    /// End-of-move cleaning requested
    pub requires_cleaning: bool,

    /// Insurance cover level
    pub insurance_level: InsuranceLevel,

    /// Calendar date the job should happen
    pub preferred_date: NaiveDate,

    /// When the quote was requested; lead time = preferred_date - requested_at
    pub requested_at: DateTime<Utc>,
}

impl PricingInput {
    /// Create a new pricing input with no items, ground access, and no extras
    pub fn new(
        job_type: JobType,
        distance_miles: f64,
        preferred_date: NaiveDate,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            job_type,
            distance_miles,
            items: Vec::new(),
            pickup_floor: 0,
            delivery_floor: 0,
            pickup_has_elevator: false,
            delivery_has_elevator: false,
            requires_packaging: false,
            requires_assembly: false,
            requires_disassembly: false,
            requires_cleaning: false,
            insurance_level: InsuranceLevel::default(),
            preferred_date,
            requested_at,
        }
    }

    /// Set the item list
    pub fn with_items(mut self, items: Vec<JobItem>) -> Self {
        self.items = items;
        self
    }

    /// Add a single item
    pub fn with_item(mut self, item: JobItem) -> Self {
        self.items.push(item);
        self
    }

    /// Set pickup and delivery floors
    pub fn with_floors(mut self, pickup_floor: u32, delivery_floor: u32) -> Self {
        self.pickup_floor = pickup_floor;
        self.delivery_floor = delivery_floor;
        self
    }

    /// Set elevator availability on each side
    pub fn with_elevators(mut self, pickup: bool, delivery: bool) -> Self {
        self.pickup_has_elevator = pickup;
        self.delivery_has_elevator = delivery;
        self
    }

    /// Set the service flags in one call
    pub fn with_services(
        mut self,
        packaging: bool,
        assembly: bool,
        disassembly: bool,
        cleaning: bool,
    ) -> Self {
        self.requires_packaging = packaging;
        self.requires_assembly = assembly;
        self.requires_disassembly = disassembly;
        self.requires_cleaning = cleaning;
        self
    }

    /// Set the insurance level
    pub fn with_insurance(mut self, level: InsuranceLevel) -> Self {
        self.insurance_level = level;
        self
    }

    /// Total load weight across all items in kilograms
    pub fn total_weight_kg(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.quantity as f64 * i.weight_kg)
            .sum()
    }

    /// Total load volume across all items in cubic metres
    pub fn total_volume_m3(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.quantity as f64 * i.volume_m3)
            .sum()
    }

    /// Lead time between quote request and preferred date, in whole days,
    /// clamped at zero when the preferred date is already in the past
    pub fn lead_time_days(&self) -> i64 {
        let requested = self.requested_at.date_naive();
        (self.preferred_date - requested).num_days().max(0)
    }

    /// Reject structurally invalid numeric fields
    ///
    /// Out-of-range business values (negative distance, zero items) are not
    /// errors; only non-finite numbers are, and those signal a caller bug.
    pub fn validate(&self) -> Result<()> {
        if !self.distance_miles.is_finite() {
            return Err(PricingError::NonFiniteValue {
                field: "distance_miles",
                value: self.distance_miles,
            }
            .into());
        }
        for item in &self.items {
            if !item.weight_kg.is_finite() {
                return Err(PricingError::NonFiniteValue {
                    field: "weight_kg",
                    value: item.weight_kg,
                }
                .into());
            }
            if !item.volume_m3.is_finite() {
                return Err(PricingError::NonFiniteValue {
                    field: "volume_m3",
                    value: item.volume_m3,
                }
                .into());
            }
        }
        Ok(())
    }
}
