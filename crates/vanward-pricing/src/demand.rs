//! Demand multiplier calculation
//!
//! Three independent factors reflect compounding demand pressure and
//! combine by multiplication, never addition:
//!
//! - day-of-week: weekends price higher than weekdays
//! - season: month factor following historical moving-season demand
//! - lead time: urgency premium under the short-lead threshold, neutral in
//!   the normal range, early-booking discount past the early threshold
//!
//! The product is clamped to the profile's `[floor, ceiling]` so the
//! subtotal can neither collapse nor run away on stacked factors.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use vanward_common::{DemandTables, PricingInput};

/// Day-of-week factor for the preferred date
pub fn day_factor(date: NaiveDate, tables: &DemandTables) -> Decimal {
    match date.weekday() {
        Weekday::Sat => tables.saturday_factor,
        Weekday::Sun => tables.sunday_factor,
        _ => tables.weekday_factor,
    }
}

/// Seasonal factor for the preferred date's month
pub fn season_factor(date: NaiveDate, tables: &DemandTables) -> Decimal {
    tables.month_factors[date.month0() as usize]
}

/// Lead-time factor from whole days between request and preferred date
///
/// Negative lead times never occur here; callers clamp at zero, which
/// lands in the urgency band.
pub fn lead_time_factor(lead_days: i64, tables: &DemandTables) -> Decimal {
    if lead_days < tables.short_lead_days {
        tables.urgent_factor
    } else if lead_days < tables.normal_lead_days {
        tables.short_lead_factor
    } else if lead_days < tables.early_lead_days {
        Decimal::ONE
    } else {
        tables.early_booking_factor
    }
}

/// Combined demand multiplier for a job, clamped to the table's bounds
pub fn demand_multiplier(input: &PricingInput, tables: &DemandTables) -> Decimal {
    let combined = day_factor(input.preferred_date, tables)
        * season_factor(input.preferred_date, tables)
        * lead_time_factor(input.lead_time_days(), tables);
    combined.clamp(tables.floor, tables.ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::resolve_profile;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use vanward_common::{JobType, RateProfileId};

    fn tables() -> DemandTables {
        resolve_profile(RateProfileId::Standard, true).demand
    }

    #[test]
    fn test_weekend_prices_higher_than_weekday() {
        let t = tables();
        let monday = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
        let saturday = NaiveDate::from_ymd_opt(2025, 6, 21).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2025, 6, 22).unwrap();

        assert_eq!(day_factor(monday, &t), dec!(1.00));
        assert!(day_factor(saturday, &t) > day_factor(monday, &t));
        assert!(day_factor(sunday, &t) > day_factor(monday, &t));
    }

    #[test]
    fn test_summer_peaks_winter_dips() {
        let t = tables();
        let january = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let july = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();

        assert_eq!(season_factor(january, &t), dec!(0.90));
        assert_eq!(season_factor(july, &t), dec!(1.15));
    }

    #[test]
    fn test_lead_time_bands() {
        let t = tables();
        assert_eq!(lead_time_factor(0, &t), dec!(1.25));
        assert_eq!(lead_time_factor(1, &t), dec!(1.25));
        assert_eq!(lead_time_factor(2, &t), dec!(1.05));
        assert_eq!(lead_time_factor(6, &t), dec!(1.05));
        assert_eq!(lead_time_factor(7, &t), Decimal::ONE);
        assert_eq!(lead_time_factor(27, &t), Decimal::ONE);
        assert_eq!(lead_time_factor(28, &t), dec!(0.95));
        assert_eq!(lead_time_factor(90, &t), dec!(0.95));
    }

    #[test]
    fn test_combined_multiplier_worked_example() {
        // Monday 2025-01-13 requested on 2025-01-09: weekday x January x
        // 4-day lead = 1.00 x 0.90 x 1.05 = 0.945
        let input = vanward_common::PricingInput::new(
            JobType::SingleItem,
            99.0,
            NaiveDate::from_ymd_opt(2025, 1, 13).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 9, 9, 0, 0).unwrap(),
        );
        assert_eq!(demand_multiplier(&input, &tables()), dec!(0.945));
    }

    #[test]
    fn test_past_preferred_date_is_maximum_urgency() {
        let input = vanward_common::PricingInput::new(
            JobType::SingleItem,
            10.0,
            NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 16, 9, 0, 0).unwrap(),
        );
        assert_eq!(input.lead_time_days(), 0);
        // Tuesday x June x urgent = 1.00 x 1.10 x 1.25 = 1.375
        assert_eq!(demand_multiplier(&input, &tables()), dec!(1.3750));
    }

    #[test]
    fn test_multiplier_stays_within_clamp() {
        let t = tables();
        // Saturday in August with same-day lead stacks the highest factors
        let input = vanward_common::PricingInput::new(
            JobType::HouseMove,
            10.0,
            NaiveDate::from_ymd_opt(2025, 8, 16).unwrap(),
            Utc.with_ymd_and_hms(2025, 8, 16, 7, 0, 0).unwrap(),
        );
        let m = demand_multiplier(&input, &t);
        assert!(m >= t.floor && m <= t.ceiling);
        // 1.15 x 1.15 x 1.25 = 1.653125, inside the ceiling
        assert_eq!(m, dec!(1.65312500));
    }
}
