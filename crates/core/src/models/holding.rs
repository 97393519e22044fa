use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::CoreError;

/// One symbol's position: how many shares and what was paid per share.
///
/// Fields are private so a `Holding` can only be built through
/// [`Holding::new`], which enforces strictly positive finite numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    symbol: String,
    shares: f64,
    buy_price: f64,
}

impl Holding {
    /// Build a holding. The symbol is trimmed and uppercased.
    pub fn new(symbol: impl AsRef<str>, shares: f64, buy_price: f64) -> Result<Self, CoreError> {
        let symbol = symbol.as_ref().trim().to_uppercase();
        if symbol.is_empty() {
            return Err(CoreError::InvalidInput("Holding symbol must not be empty".into()));
        }
        if !shares.is_finite() || shares <= 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "Shares for {symbol} must be a positive finite number, got {shares}"
            )));
        }
        if !buy_price.is_finite() || buy_price <= 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "Buy price for {symbol} must be a positive finite number, got {buy_price}"
            )));
        }
        Ok(Self {
            symbol,
            shares,
            buy_price,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn shares(&self) -> f64 {
        self.shares
    }

    pub fn buy_price(&self) -> f64 {
        self.buy_price
    }
}

/// An ordered, immutable snapshot of holdings produced by one ingestion.
///
/// Tables are never edited in place: a new ingestion builds a new table and
/// the [`HoldingStore`](crate::storage::holding_store::HoldingStore) swaps it in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingTable {
    /// Identifies this snapshot
    pub snapshot_id: Uuid,

    /// When the snapshot was built
    pub loaded_at: DateTime<Utc>,

    /// Holdings in the order their rows appeared
    holdings: Vec<Holding>,
}

impl HoldingTable {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self {
            snapshot_id: Uuid::new_v4(),
            loaded_at: Utc::now(),
            holdings,
        }
    }

    /// The table every process starts with.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Holding> {
        self.holdings.iter()
    }
}

impl Default for HoldingTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a HoldingTable {
    type Item = &'a Holding;
    type IntoIter = std::slice::Iter<'a, Holding>;

    fn into_iter(self) -> Self::IntoIter {
        self.holdings.iter()
    }
}
