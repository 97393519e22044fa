use std::collections::HashMap;
use std::time::Duration;

use crate::models::quote::{PriceQuote, QuoteSource};
use crate::models::settings::Settings;
use crate::providers::registry::QuoteProviderRegistry;
use crate::providers::static_table::StaticPriceTable;
use crate::providers::traits::{MissReason, QuoteOutcome};

/// Resolves a symbol to a price through an ordered fallback cascade.
///
/// Cascade:
/// 1. Each registered provider, in registration order, bounded by `timeout`.
///    The first usable price wins; later providers are not asked.
/// 2. The static last-known-price table.
/// 3. The table's default constant.
///
/// `resolve` never fails. Provider failures are logged and swallowed, so a
/// caller that cares about freshness must look at `PriceQuote::source`.
/// Nothing is cached: every call walks the cascade again.
pub struct PriceResolver {
    registry: QuoteProviderRegistry,
    fallback: StaticPriceTable,
    timeout: Duration,
}

impl PriceResolver {
    pub fn new(registry: QuoteProviderRegistry, fallback: StaticPriceTable, timeout: Duration) -> Self {
        Self {
            registry,
            fallback,
            // A zero bound would turn every provider into an instant miss.
            timeout: timeout.max(Duration::from_millis(1)),
        }
    }

    /// Resolver wired with the default providers, table and timeout from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_registry(QuoteProviderRegistry::new_with_defaults(settings), settings)
    }

    /// Resolver over a caller-supplied registry, table and timeout from `settings`.
    pub fn with_registry(registry: QuoteProviderRegistry, settings: &Settings) -> Self {
        Self::new(
            registry,
            StaticPriceTable::new(settings.default_price),
            Duration::from_secs(settings.quote_timeout_secs),
        )
    }

    /// Names of the live providers in the order they are tried.
    pub fn provider_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Resolve one symbol. Always returns a quote with a positive price.
    pub async fn resolve(&self, symbol: &str) -> PriceQuote {
        let symbol = symbol.trim().to_uppercase();

        for provider in self.registry.providers() {
            let outcome = match tokio::time::timeout(self.timeout, provider.fetch(&symbol)).await {
                Ok(outcome) => outcome,
                Err(_) => QuoteOutcome::NotFound(MissReason::TimedOut),
            };

            match outcome {
                QuoteOutcome::Found(price) if price.is_finite() && price > 0.0 => {
                    return PriceQuote {
                        symbol,
                        price,
                        source: QuoteSource::Provider(provider.name().to_string()),
                    };
                }
                QuoteOutcome::Found(price) => {
                    log::debug!("{} returned unusable price {price} for {symbol}", provider.name());
                }
                QuoteOutcome::NotFound(reason) => {
                    log::debug!("{} has no quote for {symbol}: {reason}", provider.name());
                }
            }
        }

        let price = match self.fallback.lookup(&symbol) {
            Some(price) => {
                log::warn!("All providers missed {symbol}; using last-known price {price}");
                price
            }
            None => {
                let price = self.fallback.default_price();
                log::warn!("All providers missed {symbol} and it has no last-known price; using default {price}");
                price
            }
        };

        PriceQuote {
            symbol,
            price,
            source: QuoteSource::StaticFallback,
        }
    }

    /// Resolve several symbols one after another into a symbol → price map.
    ///
    /// Keys are the normalized (trimmed, uppercased) symbols. Blank entries are skipped.
    pub async fn resolve_many<S: AsRef<str>>(&self, symbols: &[S]) -> HashMap<String, f64> {
        let mut prices = HashMap::with_capacity(symbols.len());
        for symbol in symbols {
            if symbol.as_ref().trim().is_empty() {
                continue;
            }
            let quote = self.resolve(symbol.as_ref()).await;
            prices.insert(quote.symbol, quote.price);
        }
        prices
    }
}
