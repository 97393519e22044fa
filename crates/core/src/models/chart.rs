use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::quote::PriceQuote;

/// A single synthetic data point for a price chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Calendar day of this point
    pub date: NaiveDate,

    /// Jittered price around the base quote
    pub price: f64,

    /// Synthetic traded volume, when the series includes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

/// Everything the stock detail view needs: the quote plus a chart around it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub quote: PriceQuote,
    pub chart: Vec<ChartPoint>,
}
