use serde::{Deserialize, Serialize};

/// Advice for one holding, produced by a recommendation policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub symbol: String,

    /// (current_price − buy_price) / buy_price × 100, rounded to 2 dp
    pub performance_pct: f64,

    /// Human-readable advice, e.g. "hold" or "BUY"
    pub recommendation: String,

    pub current_shares: f64,

    /// Share count the rebalancing stub proposes; `None` for advice-only policies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_shares: Option<f64>,
}
