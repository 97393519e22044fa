use async_trait::async_trait;

use crate::errors::CoreError;

/// Why a provider produced no usable price.
#[derive(Debug, Clone, PartialEq)]
pub enum MissReason {
    /// Transport failure, non-success status or unparseable payload
    Failed(String),
    /// The response had no price for the symbol
    NoPrice,
    /// A price arrived but was zero, negative or not finite
    InvalidPrice(f64),
    /// The request exceeded the resolver's time bound
    TimedOut,
}

impl std::fmt::Display for MissReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissReason::Failed(msg) => write!(f, "request failed: {msg}"),
            MissReason::NoPrice => write!(f, "no price in response"),
            MissReason::InvalidPrice(p) => write!(f, "unusable price {p}"),
            MissReason::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Result of asking one provider for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteOutcome {
    Found(f64),
    NotFound(MissReason),
}

impl QuoteOutcome {
    /// Turn a raw provider price into an outcome, rejecting prices that are
    /// not strictly positive and finite.
    pub fn from_price(price: f64) -> Self {
        if price.is_finite() && price > 0.0 {
            QuoteOutcome::Found(price)
        } else {
            QuoteOutcome::NotFound(MissReason::InvalidPrice(price))
        }
    }
}

impl From<Result<Option<f64>, CoreError>> for QuoteOutcome {
    fn from(result: Result<Option<f64>, CoreError>) -> Self {
        match result {
            Ok(Some(price)) => QuoteOutcome::from_price(price),
            Ok(None) => QuoteOutcome::NotFound(MissReason::NoPrice),
            Err(CoreError::Timeout { .. }) => QuoteOutcome::NotFound(MissReason::TimedOut),
            Err(e) => QuoteOutcome::NotFound(MissReason::Failed(e.to_string())),
        }
    }
}

/// Trait abstraction for all quote providers.
///
/// Each upstream API implements this trait and the resolver walks them in
/// registration order. Implementations do their own I/O and error handling
/// with `?` internally; only the typed outcome leaves the provider.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs and quote provenance).
    fn name(&self) -> &str;

    /// Try to fetch the latest price for an uppercased symbol.
    async fn fetch(&self, symbol: &str) -> QuoteOutcome;
}
