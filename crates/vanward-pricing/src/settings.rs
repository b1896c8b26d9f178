//! Pricing configuration
//!
//! Process-level settings read by callers (HTTP handlers, admin jobs) and
//! passed into the calculator explicitly as [`PricingOptions`] - the
//! calculator itself never touches the environment.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use vanward_common::{PriceEstimate, RateProfileId};

use crate::engine::PricingOptions;

/// Platform pricing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Active rate profile
    pub profile: RateProfileId,
    /// Platform-level VAT toggle (the competitive profile overrides it off)
    pub enable_vat: bool,
    /// Quote validity window in milliseconds
    pub quote_validity_ms: u64,
    /// Maximum entries held by the quote cache
    pub quote_cache_capacity: usize,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            profile: RateProfileId::Standard,
            enable_vat: true,
            quote_validity_ms: PriceEstimate::DEFAULT_VALIDITY_MS,
            quote_cache_capacity: 1024,
        }
    }
}

impl PricingSettings {
    /// Load settings from environment and .env file
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Ok(profile) = std::env::var("VANWARD_PRICING_PROFILE") {
            // Unknown names fall back to standard, same as everywhere else
            cfg.profile = profile.parse().unwrap_or_default();
        }
        if let Ok(val) = std::env::var("VANWARD_VAT_ENABLED") {
            cfg.enable_vat = matches!(val.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Ok(val) = std::env::var("VANWARD_QUOTE_VALIDITY_MS") {
            if let Ok(v) = val.parse() {
                cfg.quote_validity_ms = v;
            }
        }
        if let Ok(val) = std::env::var("VANWARD_QUOTE_CACHE_CAPACITY") {
            if let Ok(v) = val.parse() {
                cfg.quote_cache_capacity = v;
            }
        }

        Ok(cfg)
    }

    /// The options these settings resolve to for a calculation
    pub fn options(&self) -> PricingOptions {
        PricingOptions::new(self.profile, self.enable_vat)
    }
}
