//! In-process quote cache
//!
//! Avoids redundant calculations and keeps pricing consistent for the same
//! request within a quote's validity window. Purely an optimization: a hit
//! returns the previously computed estimate unchanged, expired entries are
//! treated as misses.

use dashmap::DashMap;
use tracing::debug;
use vanward_common::{PriceEstimate, PricingInput, Result};

use crate::engine::PricingOptions;

/// Concurrent quote cache keyed by job input and options
pub struct QuoteCache {
    entries: DashMap<String, PriceEstimate>,
    max_entries: usize,
}

impl QuoteCache {
    /// Create a cache holding at most `max_entries` quotes
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries,
        }
    }

    /// Deterministic key over everything that feeds the calculation
    fn cache_key(input: &PricingInput, options: &PricingOptions) -> Result<String> {
        let canonical = serde_json::to_vec(&(input, options))?;
        Ok(blake3::hash(&canonical).to_hex().to_string())
    }

    /// Look up a still-valid quote for this request
    pub fn get(&self, input: &PricingInput, options: &PricingOptions) -> Result<Option<PriceEstimate>> {
        let key = Self::cache_key(input, options)?;
        // Clone out of the shard guard before any removal touches the map
        let cached = self.entries.get(&key).map(|entry| entry.clone());
        match cached {
            Some(entry) if entry.is_valid() => {
                debug!(key = %key, "quote cache hit");
                Ok(Some(entry))
            }
            Some(_) => {
                debug!(key = %key, "quote cache entry expired");
                self.entries.remove(&key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Store a quote for this request
    pub fn set(
        &self,
        input: &PricingInput,
        options: &PricingOptions,
        estimate: &PriceEstimate,
    ) -> Result<()> {
        if self.entries.len() >= self.max_entries {
            // Drop expired quotes first; if the cache is still full, make
            // room by evicting an arbitrary entry
            self.entries.retain(|_, e| e.is_valid());
            if self.entries.len() >= self.max_entries {
                if let Some(key) = self.entries.iter().next().map(|e| e.key().clone()) {
                    self.entries.remove(&key);
                }
            }
        }

        let key = Self::cache_key(input, options)?;
        self.entries.insert(key, estimate.clone());
        Ok(())
    }

    /// Drop every cached quote (e.g. after a rate-profile redeploy)
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;
    use vanward_common::{JobType, RateProfileId};

    use crate::engine::calculate_price;

    fn input(distance: f64) -> PricingInput {
        PricingInput::new(
            JobType::SingleItem,
            distance,
            NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).unwrap(),
        )
    }

    fn estimate_for(distance: f64, valid_for_ms: i64) -> PriceEstimate {
        let breakdown = calculate_price(&input(distance), &PricingOptions::default()).unwrap();
        let now = Utc::now().timestamp_millis();
        PriceEstimate {
            quote_id: Uuid::new_v4(),
            breakdown,
            currency: "GBP".to_string(),
            valid_for_ms: valid_for_ms.max(0) as u64,
            expires_at: now + valid_for_ms,
            computed_at: now,
        }
    }

    #[test]
    fn test_key_is_deterministic_and_input_sensitive() {
        let options = PricingOptions::default();
        let a = QuoteCache::cache_key(&input(10.0), &options).unwrap();
        let b = QuoteCache::cache_key(&input(10.0), &options).unwrap();
        let c = QuoteCache::cache_key(&input(11.0), &options).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let competitive = PricingOptions::new(RateProfileId::Competitive, true);
        let d = QuoteCache::cache_key(&input(10.0), &competitive).unwrap();
        assert_ne!(a, d);
    }

    #[test]
    fn test_miss_then_hit() {
        let cache = QuoteCache::new(8);
        let options = PricingOptions::default();
        let job = input(25.0);

        assert!(cache.get(&job, &options).unwrap().is_none());

        let estimate = estimate_for(25.0, 60_000);
        cache.set(&job, &options, &estimate).unwrap();

        let hit = cache.get(&job, &options).unwrap().expect("cached quote");
        assert_eq!(hit.quote_id, estimate.quote_id);
        assert_eq!(hit.breakdown.total_price, estimate.breakdown.total_price);
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let cache = QuoteCache::new(8);
        let options = PricingOptions::default();
        let job = input(25.0);

        let expired = estimate_for(25.0, -1_000);
        cache.set(&job, &options, &expired).unwrap();

        assert!(cache.get(&job, &options).unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_is_bounded() {
        let cache = QuoteCache::new(2);
        let options = PricingOptions::default();

        for distance in [1.0, 2.0, 3.0, 4.0, 5.0] {
            let estimate = estimate_for(distance, 60_000);
            cache.set(&input(distance), &options, &estimate).unwrap();
        }
        assert!(cache.len() <= 2);
    }

    #[test]
    fn test_total_survives_round_trip() {
        let cache = QuoteCache::new(8);
        let options = PricingOptions::new(RateProfileId::Competitive, false);
        let job = input(99.0);

        let breakdown = calculate_price(&job, &options).unwrap();
        assert_eq!(breakdown.total_price, dec!(189.81));

        let now = Utc::now().timestamp_millis();
        let estimate = PriceEstimate {
            quote_id: Uuid::new_v4(),
            breakdown,
            currency: "GBP".to_string(),
            valid_for_ms: 60_000,
            expires_at: now + 60_000,
            computed_at: now,
        };
        cache.set(&job, &options, &estimate).unwrap();
        let hit = cache.get(&job, &options).unwrap().unwrap();
        assert_eq!(hit.breakdown.total_price, dec!(189.81));
    }
}
