use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use super::traits::{QuoteOutcome, QuoteProvider};

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER: &str = "Alpha Vantage";

/// Alpha Vantage GLOBAL_QUOTE provider for stock/equity prices.
///
/// - **Free tier**: 25 requests/day (across ALL endpoints).
/// - **Requires**: API key (set via settings as "alphavantage").
/// - **Coverage**: 100k+ global equity symbols.
///
/// When the daily limit is hit the API answers 200 with a "Note" body and no
/// quote, which surfaces here as a missing price.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self::with_base_url(api_key, timeout, BASE_URL)
    }

    /// Point the provider at a different host (e.g., a local stub server).
    pub fn with_base_url(api_key: String, timeout: Duration, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
            base_url: base_url.into(),
        }
    }

    async fn fetch_global_quote(&self, symbol: &str) -> Result<Option<f64>, CoreError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", &self.api_key),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: GlobalQuoteResponse = resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse quote for {symbol}: {e}"),
        })?;

        Ok(parse_price(body))
    }
}

// ── Alpha Vantage API response types ────────────────────────────────

#[derive(Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
}

#[derive(Deserialize)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
}

/// Missing and non-numeric price strings both count as "no price".
fn parse_price(body: GlobalQuoteResponse) -> Option<f64> {
    body.global_quote
        .and_then(|q| q.price)
        .and_then(|p| p.trim().parse::<f64>().ok())
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch(&self, symbol: &str) -> QuoteOutcome {
        self.fetch_global_quote(symbol).await.into()
    }
}
