use serde::{Deserialize, Serialize};

/// Where a resolved price came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "provider", rename_all = "camelCase")]
pub enum QuoteSource {
    /// A live answer from the named provider
    Provider(String),
    /// The static last-known-price table (or the default constant behind it)
    StaticFallback,
}

impl QuoteSource {
    /// `true` when the price came from a live provider rather than the table.
    pub fn is_live(&self) -> bool {
        matches!(self, QuoteSource::Provider(_))
    }
}

impl std::fmt::Display for QuoteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteSource::Provider(name) => write!(f, "{name}"),
            QuoteSource::StaticFallback => write!(f, "Static fallback"),
        }
    }
}

/// A single resolved price with provenance. Produced per call, never cached.
///
/// Callers should treat a `StaticFallback` quote as potentially stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub symbol: String,
    pub price: f64,
    pub source: QuoteSource,
}
