use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default bound on a single provider request, in seconds.
pub const DEFAULT_QUOTE_TIMEOUT_SECS: u64 = 5;

/// Price returned when no provider answers and the symbol is not in the static table.
pub const DEFAULT_FALLBACK_PRICE: f64 = 100.0;

/// Which recommendation policy `Sentinel::optimize` applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvisorPolicy {
    /// Deterministic performance bands
    Threshold,
    /// Randomized share-count nudge (placeholder, not a real optimizer)
    Rebalance,
}

/// A closed multiplier interval `[low, high]` used for random jitter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JitterBand {
    pub low: f64,
    pub high: f64,
}

impl JitterBand {
    /// Chart jitter used by the detailed stock view.
    pub const NARROW: JitterBand = JitterBand {
        low: 0.97,
        high: 1.03,
    };

    /// Wider chart jitter used by the simpler stock view.
    pub const WIDE: JitterBand = JitterBand {
        low: 0.95,
        high: 1.05,
    };

    /// Share multiplier range of the rebalancing stub.
    pub const REBALANCE: JitterBand = JitterBand {
        low: 0.95,
        high: 1.10,
    };

    /// Whether `value` lies inside `[base × low, base × high]`.
    pub fn contains(&self, base: f64, value: f64) -> bool {
        value >= base * self.low && value <= base * self.high
    }

    /// A band is usable when both ends are positive finite and ordered.
    pub fn is_valid(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low > 0.0 && self.low <= self.high
    }
}

/// Runtime configuration for the quote, chart and advisor services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Optional API keys for providers that require them.
    /// Keys: provider name (e.g., "alphavantage").
    /// Values: the API key string.
    pub api_keys: HashMap<String, String>,

    /// Upper bound on each provider request
    pub quote_timeout_secs: u64,

    /// Last-resort price for symbols missing from the static table
    pub default_price: f64,

    /// Multiplier band for synthetic chart prices
    pub chart_band: JitterBand,

    /// Multiplier band for the rebalancing stub
    pub rebalance_band: JitterBand,

    /// Whether chart points carry a synthetic volume
    pub include_volume: bool,

    /// Policy used by `optimize`
    pub policy: AdvisorPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_keys: HashMap::new(),
            quote_timeout_secs: DEFAULT_QUOTE_TIMEOUT_SECS,
            default_price: DEFAULT_FALLBACK_PRICE,
            chart_band: JitterBand::NARROW,
            rebalance_band: JitterBand::REBALANCE,
            include_volume: true,
            policy: AdvisorPolicy::Threshold,
        }
    }
}

impl Settings {
    /// Defaults overlaid with `ALPHAVANTAGE_API_KEY` and `SENTINEL_QUOTE_TIMEOUT_SECS`.
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(key) = std::env::var("ALPHAVANTAGE_API_KEY") {
            if !key.trim().is_empty() {
                settings.api_keys.insert("alphavantage".into(), key.trim().to_string());
            }
        }
        if let Some(secs) = std::env::var("SENTINEL_QUOTE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|s| *s > 0)
        {
            settings.quote_timeout_secs = secs;
        }
        settings
    }
}
