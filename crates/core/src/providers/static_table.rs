use std::collections::HashMap;

use crate::models::settings::DEFAULT_FALLBACK_PRICE;

/// Last-known prices used when every live provider misses.
const LAST_KNOWN_PRICES: &[(&str, f64)] = &[
    ("AAPL", 175.00),
    ("GOOGL", 140.00),
    ("MSFT", 280.00),
    ("AMZN", 140.00),
    ("TSLA", 175.00),
];

/// Static per-symbol price table with a default for unknown symbols.
///
/// This is the bottom of the fallback cascade: it always answers.
#[derive(Debug, Clone)]
pub struct StaticPriceTable {
    prices: HashMap<String, f64>,
    default_price: f64,
}

impl StaticPriceTable {
    /// Table seeded with the built-in last-known prices.
    pub fn new(default_price: f64) -> Self {
        let prices = LAST_KNOWN_PRICES
            .iter()
            .map(|(symbol, price)| (symbol.to_string(), *price))
            .collect();
        Self::with_prices(prices, default_price)
    }

    /// Table with caller-supplied prices. Non-positive entries and a
    /// non-positive default are replaced so the table never yields an unusable price.
    pub fn with_prices(prices: HashMap<String, f64>, default_price: f64) -> Self {
        let default_price = if default_price.is_finite() && default_price > 0.0 {
            default_price
        } else {
            DEFAULT_FALLBACK_PRICE
        };
        let prices = prices
            .into_iter()
            .filter(|(_, p)| p.is_finite() && *p > 0.0)
            .map(|(s, p)| (s.trim().to_uppercase(), p))
            .collect();
        Self {
            prices,
            default_price,
        }
    }

    /// The table entry for `symbol`, if any.
    pub fn lookup(&self, symbol: &str) -> Option<f64> {
        self.prices.get(&symbol.trim().to_uppercase()).copied()
    }

    /// The table entry for `symbol`, or the default constant.
    pub fn price_for(&self, symbol: &str) -> f64 {
        self.lookup(symbol).unwrap_or(self.default_price)
    }

    pub fn default_price(&self) -> f64 {
        self.default_price
    }
}

impl Default for StaticPriceTable {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_PRICE)
    }
}
