use rand::{Rng, RngCore};

use crate::models::recommendation::Recommendation;
use crate::models::settings::JitterBand;
use crate::models::valuation::EnrichedHolding;
use crate::services::valuation_service::{percent_of, round2};

pub const STRONG_PERFORMER: &str = "strong performer, consider taking profits";
pub const GOOD_PERFORMER: &str = "good performer, hold";
pub const UNDERPERFORMER: &str = "underperformer, review position";
pub const HOLD: &str = "hold";

pub const REBALANCE_BUY: &str = "BUY";
pub const REBALANCE_HOLD: &str = "HOLD";

/// Percentage change of current price over buy price, 0 for a zero buy price.
pub fn performance_pct(current_price: f64, buy_price: f64) -> f64 {
    percent_of(current_price - buy_price, buy_price)
}

/// A rule that turns one valued holding into advice.
///
/// The random source is always passed in so policies that draw from it can
/// be replayed with a seeded generator; deterministic policies ignore it.
pub trait RecommendationPolicy: Send + Sync {
    fn name(&self) -> &str;

    fn recommend(&self, holding: &EnrichedHolding, rng: &mut dyn RngCore) -> Recommendation;
}

/// Fixed performance bands, evaluated top to bottom:
///
/// | performance      | advice                                      |
/// |------------------|---------------------------------------------|
/// | > 20             | strong performer, consider taking profits   |
/// | > 10             | good performer, hold                        |
/// | ≤ −10            | underperformer, review position             |
/// | otherwise        | hold                                        |
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdPolicy;

impl ThresholdPolicy {
    pub fn advice_for(performance: f64) -> &'static str {
        if performance > 20.0 {
            STRONG_PERFORMER
        } else if performance > 10.0 {
            GOOD_PERFORMER
        } else if performance <= -10.0 {
            UNDERPERFORMER
        } else {
            HOLD
        }
    }
}

impl RecommendationPolicy for ThresholdPolicy {
    fn name(&self) -> &str {
        "threshold"
    }

    fn recommend(&self, holding: &EnrichedHolding, _rng: &mut dyn RngCore) -> Recommendation {
        let performance = performance_pct(holding.quote_price(), holding.buy_price);
        Recommendation {
            symbol: holding.symbol.clone(),
            performance_pct: round2(performance),
            recommendation: Self::advice_for(performance).to_string(),
            current_shares: holding.shares,
            suggested_shares: None,
        }
    }
}

/// Placeholder rebalancer: nudges each share count by a random multiplier.
///
/// This is not an optimizer. It draws `m ~ U[low, high]`, proposes
/// `floor(shares × m)` and says "BUY" when that exceeds the current count.
#[derive(Debug, Clone, Copy)]
pub struct RebalancePolicy {
    band: JitterBand,
}

impl RebalancePolicy {
    /// An unusable band falls back to [`JitterBand::REBALANCE`].
    pub fn new(band: JitterBand) -> Self {
        let band = if band.is_valid() {
            band
        } else {
            JitterBand::REBALANCE
        };
        Self { band }
    }

    pub fn band(&self) -> JitterBand {
        self.band
    }
}

impl Default for RebalancePolicy {
    fn default() -> Self {
        Self::new(JitterBand::REBALANCE)
    }
}

impl RecommendationPolicy for RebalancePolicy {
    fn name(&self) -> &str {
        "rebalance"
    }

    fn recommend(&self, holding: &EnrichedHolding, rng: &mut dyn RngCore) -> Recommendation {
        let multiplier: f64 = rng.gen_range(self.band.low..=self.band.high);
        let new_shares = (holding.shares * multiplier).floor();
        let advice = if new_shares > holding.shares {
            REBALANCE_BUY
        } else {
            REBALANCE_HOLD
        };

        Recommendation {
            symbol: holding.symbol.clone(),
            performance_pct: round2(performance_pct(holding.quote_price(), holding.buy_price)),
            recommendation: advice.to_string(),
            current_shares: holding.shares,
            suggested_shares: Some(new_shares),
        }
    }
}

/// Applies a recommendation policy across a valued portfolio.
pub struct OptimizationAdvisor;

impl OptimizationAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// One recommendation per holding, in input order. Holdings whose
    /// prices are not finite are skipped so one bad record cannot sink the batch.
    pub fn advise(
        &self,
        policy: &dyn RecommendationPolicy,
        holdings: &[EnrichedHolding],
        rng: &mut dyn RngCore,
    ) -> Vec<Recommendation> {
        holdings
            .iter()
            .filter_map(|holding| {
                if !holding.quote_price().is_finite() || !holding.buy_price.is_finite() {
                    log::warn!("Skipping {} from {} advice: non-finite price", holding.symbol, policy.name());
                    return None;
                }
                Some(policy.recommend(holding, &mut *rng))
            })
            .collect()
    }
}

impl Default for OptimizationAdvisor {
    fn default() -> Self {
        Self::new()
    }
}
