use thiserror::Error;

/// Unified error type for the entire sentinel-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Provider failures never escape the price resolver; they are folded into
/// `QuoteOutcome::NotFound` before the fallback cascade moves on.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Ingestion ───────────────────────────────────────────────────
    #[error("Missing required columns: {missing:?}. Found columns: {found:?}")]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("CSV error: {0}")]
    Csv(String),

    // ── Input ───────────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request to {provider} timed out after {seconds}s")]
    Timeout { provider: String, seconds: u64 },

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Whether this error came out of ingestion schema validation.
    /// The transport layer maps these to a 400 response.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::MissingColumns { .. } | CoreError::InvalidInput(_))
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        CoreError::Csv(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs to prevent
        // API key leakage. reqwest errors often contain full URLs with secrets.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
