use crate::models::holding::{Holding, HoldingTable};
use crate::models::quote::{PriceQuote, QuoteSource};
use crate::models::valuation::{EnrichedHolding, PortfolioTotals};
use crate::services::price_service::PriceResolver;

/// Round to 2 decimal places for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole × 100`, or 0 when `whole` is 0.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Joins holdings with resolved quotes.
///
/// Pure arithmetic apart from `value_table`, which asks the resolver for
/// one quote per holding. Duplicate symbols are resolved once per holding.
pub struct PortfolioValuator;

impl PortfolioValuator {
    pub fn new() -> Self {
        Self
    }

    /// Value one holding at the quoted price.
    pub fn enrich(&self, holding: &Holding, quote: &PriceQuote) -> EnrichedHolding {
        self.enrich_raw(holding.symbol(), holding.shares(), holding.buy_price(), quote)
    }

    /// Same arithmetic as [`enrich`](Self::enrich) on unvalidated inputs.
    /// A zero cost basis yields `profit_loss_pct == 0`.
    pub fn enrich_raw(
        &self,
        symbol: &str,
        shares: f64,
        buy_price: f64,
        quote: &PriceQuote,
    ) -> EnrichedHolding {
        let total_cost = shares * buy_price;
        let total_value = shares * quote.price;
        let profit_loss = total_value - total_cost;
        let profit_loss_pct = percent_of(profit_loss, total_cost);

        EnrichedHolding {
            symbol: symbol.to_string(),
            shares,
            buy_price,
            current_price: round2(quote.price),
            total_cost: round2(total_cost),
            total_value: round2(total_value),
            profit_loss: round2(profit_loss),
            profit_loss_pct: round2(profit_loss_pct),
            price_source: quote.source.clone(),
            raw_price: Some(quote.price),
        }
    }

    /// Value every holding in `table`, in table order.
    ///
    /// A record whose arithmetic overflows to a non-finite number is logged
    /// and left out; the rest of the batch is still returned.
    pub async fn value_table(&self, table: &HoldingTable, resolver: &PriceResolver) -> Vec<EnrichedHolding> {
        let mut enriched = Vec::with_capacity(table.len());
        for holding in table {
            let quote = resolver.resolve(holding.symbol()).await;
            let record = self.enrich(holding, &quote);
            if is_finite_record(&record) {
                enriched.push(record);
            } else {
                log::warn!("Skipping {} from valuation: non-finite result", holding.symbol());
            }
        }
        enriched
    }

    /// Portfolio-level sums. Accumulates unrounded cost and value and
    /// rounds only the final figures.
    pub fn totals(&self, enriched: &[EnrichedHolding]) -> PortfolioTotals {
        let (cost, value) = enriched.iter().fold((0.0, 0.0), |(cost, value), e| {
            (cost + e.cost_basis(), value + e.market_value())
        });
        let profit_loss = value - cost;

        PortfolioTotals {
            holdings: enriched.len(),
            total_cost: round2(cost),
            total_value: round2(value),
            profit_loss: round2(profit_loss),
            profit_loss_pct: round2(percent_of(profit_loss, cost)),
            stale_quotes: enriched
                .iter()
                .filter(|e| e.price_source == QuoteSource::StaticFallback)
                .count(),
        }
    }
}

impl Default for PortfolioValuator {
    fn default() -> Self {
        Self::new()
    }
}

fn is_finite_record(e: &EnrichedHolding) -> bool {
    [e.total_cost, e.total_value, e.profit_loss, e.profit_loss_pct]
        .iter()
        .all(|v| v.is_finite())
}
