use serde::{Deserialize, Serialize};

use super::quote::QuoteSource;

/// A holding joined with its current quote.
///
/// All monetary and percentage fields are rounded to 2 decimal places.
/// Follow-on arithmetic (advice, totals) reads [`quote_price`](Self::quote_price)
/// instead of the rounded `current_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedHolding {
    pub symbol: String,
    pub shares: f64,
    pub buy_price: f64,

    /// Price the quote resolved to
    pub current_price: f64,

    /// shares × buy_price
    pub total_cost: f64,

    /// shares × current_price
    pub total_value: f64,

    /// total_value − total_cost
    pub profit_loss: f64,

    /// profit_loss / total_cost × 100, or 0 when total_cost is 0
    pub profit_loss_pct: f64,

    /// Provenance of `current_price`
    pub price_source: QuoteSource,

    /// The quote exactly as resolved. Absent on deserialized records.
    #[serde(skip)]
    pub raw_price: Option<f64>,
}

impl EnrichedHolding {
    /// Unrounded quote price, falling back to `current_price` when unknown.
    pub fn quote_price(&self) -> f64 {
        self.raw_price.unwrap_or(self.current_price)
    }

    /// Unrounded shares × buy_price.
    pub fn cost_basis(&self) -> f64 {
        self.shares * self.buy_price
    }

    /// Unrounded shares × quote price.
    pub fn market_value(&self) -> f64 {
        self.shares * self.quote_price()
    }
}

/// Sums over one valuation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub holdings: usize,
    pub total_cost: f64,
    pub total_value: f64,
    pub profit_loss: f64,
    pub profit_loss_pct: f64,

    /// How many holdings were priced from the static table
    pub stale_quotes: usize,
}

/// A full valuation pass: every priced holding plus the sums over them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub holdings: Vec<EnrichedHolding>,
    pub totals: PortfolioTotals,
}
