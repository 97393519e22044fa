pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use models::{
    chart::StockSnapshot,
    holding::HoldingTable,
    quote::PriceQuote,
    recommendation::Recommendation,
    settings::{AdvisorPolicy, Settings},
    valuation::{EnrichedHolding, PortfolioReport},
};
use providers::registry::QuoteProviderRegistry;
use rand::rngs::StdRng;
use rand::SeedableRng;
use services::{
    advisor_service::{OptimizationAdvisor, RebalancePolicy, RecommendationPolicy, ThresholdPolicy},
    chart_service::ChartSeriesGenerator,
    ingest_service::{CsvIngestor, IngestReport},
    price_service::PriceResolver,
    valuation_service::PortfolioValuator,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use storage::holding_store::HoldingStore;

use errors::CoreError;

/// Maximum chart length in days (10 years).
pub const MAX_CHART_DAYS: u32 = 3650;

/// Main entry point for the Sentinel core library.
///
/// Owns the authoritative holdings table and every service that reads it.
/// All methods take `&self`: share one instance behind an `Arc` and
/// concurrent uploads and valuations will each see a whole table.
#[must_use]
pub struct Sentinel {
    store: HoldingStore,
    resolver: PriceResolver,
    ingestor: CsvIngestor,
    valuator: PortfolioValuator,
    advisor: OptimizationAdvisor,
    charts: ChartSeriesGenerator,
    settings: Settings,
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for Sentinel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sentinel")
            .field("holdings", &self.store.snapshot().len())
            .field("providers", &self.resolver.provider_names())
            .field("policy", &self.settings.policy)
            .finish()
    }
}

impl Sentinel {
    /// Build with the default live providers (Yahoo Finance, plus Alpha
    /// Vantage when an "alphavantage" key is configured).
    pub fn new(settings: Settings) -> Self {
        let registry = QuoteProviderRegistry::new_with_defaults(&settings);
        Self::with_registry(registry, settings)
    }

    /// Build over a caller-supplied provider list (mocks, extra providers).
    pub fn with_registry(registry: QuoteProviderRegistry, settings: Settings) -> Self {
        Self {
            store: HoldingStore::new(),
            resolver: PriceResolver::with_registry(registry, &settings),
            ingestor: CsvIngestor::new(),
            valuator: PortfolioValuator::new(),
            advisor: OptimizationAdvisor::new(),
            charts: ChartSeriesGenerator::from_settings(&settings),
            settings,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replace the entropy-seeded random source with a seeded one, making
    /// charts and rebalancing advice reproducible.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Names of live providers in the order the resolver tries them.
    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.resolver.provider_names()
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// The current holdings snapshot.
    #[must_use]
    pub fn holdings(&self) -> Arc<HoldingTable> {
        self.store.snapshot()
    }

    /// Replace all holdings with the contents of a CSV upload.
    ///
    /// Fails only when a required column is missing after aliasing, in which
    /// case the previous holdings stay in place.
    pub fn upload_csv(&self, raw: &[u8]) -> Result<IngestReport, CoreError> {
        self.ingestor.ingest_into(&self.store, raw)
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Every holding valued at a freshly resolved price. Empty when no CSV
    /// has been loaded yet.
    pub async fn portfolio(&self) -> Vec<EnrichedHolding> {
        let table = self.store.snapshot();
        self.valuator.value_table(&table, &self.resolver).await
    }

    /// Valued holdings plus portfolio totals.
    pub async fn portfolio_report(&self) -> PortfolioReport {
        let holdings = self.portfolio().await;
        let totals = self.valuator.totals(&holdings);
        PortfolioReport { holdings, totals }
    }

    // ── Quotes & Charts ─────────────────────────────────────────────

    /// Resolve one symbol through the provider cascade. Never fails.
    pub async fn quote(&self, symbol: &str) -> PriceQuote {
        self.resolver.resolve(symbol).await
    }

    /// Resolve several symbols into a symbol → price map.
    pub async fn prices<S: AsRef<str>>(&self, symbols: &[S]) -> HashMap<String, f64> {
        self.resolver.resolve_many(symbols).await
    }

    /// Quote plus a synthetic `days`-long chart ending today.
    pub async fn stock(&self, symbol: &str, days: u32) -> Result<StockSnapshot, CoreError> {
        if symbol.trim().is_empty() {
            return Err(CoreError::InvalidInput("Symbol must not be empty".into()));
        }
        if days == 0 || days > MAX_CHART_DAYS {
            return Err(CoreError::InvalidInput(format!(
                "Chart length of {days} days must be between 1 and {MAX_CHART_DAYS}"
            )));
        }

        let quote = self.resolver.resolve(symbol).await;
        let chart = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.charts.generate(quote.price, days, &mut *rng)
        };

        Ok(StockSnapshot { quote, chart })
    }

    // ── Optimization ────────────────────────────────────────────────

    /// Recommendations from the policy selected in settings.
    pub async fn optimize(&self) -> Vec<Recommendation> {
        match self.settings.policy {
            AdvisorPolicy::Threshold => self.optimize_with(&ThresholdPolicy).await,
            AdvisorPolicy::Rebalance => {
                let policy = RebalancePolicy::new(self.settings.rebalance_band);
                self.optimize_with(&policy).await
            }
        }
    }

    /// Recommendations from an explicit policy.
    pub async fn optimize_with(&self, policy: &dyn RecommendationPolicy) -> Vec<Recommendation> {
        let valued = self.portfolio().await;
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.advisor.advise(policy, &valued, &mut *rng)
    }
}
