use async_trait::async_trait;

use crate::errors::CoreError;
use super::traits::{QuoteOutcome, QuoteProvider};

const PROVIDER: &str = "Yahoo Finance";

/// Yahoo Finance quote provider.
///
/// - **Free**: No API key required.
/// - **No strict rate limits** (unofficial public API).
/// - **Coverage**: Global equities, ETFs, indices, mutual funds.
///
/// Uses the `yahoo_finance_api` crate which wraps Yahoo Finance's public
/// endpoints and returns the close of the latest daily bar. The connector has
/// no per-request timeout of its own; the resolver bounds every call.
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        Ok(Self { connector })
    }

    async fn latest_close(&self, symbol: &str) -> Result<Option<f64>, CoreError> {
        let resp = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to fetch latest quote for {symbol}: {e}"),
            })?;

        // An empty chart is "no price", not a transport failure.
        Ok(resp.last_quote().ok().map(|quote| quote.close))
    }
}

#[async_trait]
impl QuoteProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch(&self, symbol: &str) -> QuoteOutcome {
        self.latest_close(symbol).await.into()
    }
}
