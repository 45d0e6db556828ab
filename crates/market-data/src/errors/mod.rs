//! Error types for the market data crate.
//!
//! None of these errors escape [`MetalPriceService::get_prices`](crate::MetalPriceService::get_prices):
//! the service absorbs them, logs them, and records them in
//! [`PriceDiagnostics`](crate::PriceDiagnostics) before falling back to the next
//! pricing stage.

use thiserror::Error;

/// Errors that can occur while acquiring metal prices.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// A provider-specific error occurred (non-success HTTP status, API failure flag).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered, but the payload is missing gold or silver prices
    /// or carries values that are not usable numbers.
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse {
        /// The provider that sent the payload
        provider: String,
        /// What was wrong with it
        message: String,
    },

    /// The persisted price cache could not be read or written.
    #[error("Price cache error: {0}")]
    Cache(String),

    /// A cached record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MarketDataError::RateLimited {
            provider: "METALS_API".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: METALS_API");

        let error = MarketDataError::ProviderError {
            provider: "METALS_API".to_string(),
            message: "HTTP 500".to_string(),
        };
        assert_eq!(format!("{}", error), "Provider error: METALS_API - HTTP 500");

        let error = MarketDataError::MalformedResponse {
            provider: "METALS_API".to_string(),
            message: "missing XAU".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Malformed response from METALS_API: missing XAU"
        );
    }
}
