//! Metals API feed for gold and silver prices.
//!
//! Requests per-gram pricing for a single quote currency and reads the
//! `XAU` (gold) and `XAG` (silver) entries of the `metals` object:
//!
//! ```text
//! GET {base_url}?api_key=KEY&currency=USD&unit=g
//!
//! { "status": "success", "currency": "USD", "unit": "g",
//!   "metals": { "XAU": 80.12, "XAG": 0.98, ... } }
//! ```
//!
//! Anything else (HTTP failure, a missing `metals` object, a missing or
//! non-numeric `XAU`/`XAG`) is reported as an error.

use async_trait::async_trait;
use log::debug;
use num_traits::FromPrimitive;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::PerGramPrices;
use crate::provider::MetalPriceFeed;

/// Provider ID constant
const PROVIDER_ID: &str = "METALS_API";

/// Default endpoint for latest prices
pub const DEFAULT_FEED_URL: &str = "https://api.metals.dev/v1/latest";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct MetalsResponse {
    metals: Option<MetalsPayload>,
}

#[derive(Debug, Deserialize)]
struct MetalsPayload {
    #[serde(rename = "XAU")]
    gold: Option<serde_json::Value>,
    #[serde(rename = "XAG")]
    silver: Option<serde_json::Value>,
}

/// HTTP metals feed.
///
/// # Example
///
/// ```ignore
/// use zakat_market_data::provider::metal_price_api::MetalPriceApiFeed;
///
/// let feed = MetalPriceApiFeed::new("your_api_key".to_string());
/// ```
pub struct MetalPriceApiFeed {
    client: Client,
    api_key: String,
    base_url: String,
}

impl MetalPriceApiFeed {
    /// Create a feed against the default endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_options(api_key, DEFAULT_FEED_URL.to_string(), REQUEST_TIMEOUT)
    }

    /// Create a feed with a custom endpoint and request timeout.
    pub fn with_options(api_key: String, base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url,
        }
    }

    fn request_url(&self, currency: &str) -> String {
        format!(
            "{}?api_key={}&currency={}&unit=g",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(currency)
        )
    }
}

/// Parse a metals API body into per-gram prices.
pub(crate) fn parse_metals_body(body: &str) -> Result<PerGramPrices, MarketDataError> {
    let response: MetalsResponse =
        serde_json::from_str(body).map_err(|e| malformed(format!("invalid JSON: {}", e)))?;

    let metals = response
        .metals
        .ok_or_else(|| malformed("missing `metals` field".to_string()))?;

    Ok(PerGramPrices {
        gold: price_field("XAU", metals.gold)?,
        silver: price_field("XAG", metals.silver)?,
    })
}

fn price_field(
    symbol: &str,
    value: Option<serde_json::Value>,
) -> Result<Decimal, MarketDataError> {
    let number = value
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| malformed(format!("missing or non-numeric `{}`", symbol)))?;

    Decimal::from_f64(number)
        .ok_or_else(|| malformed(format!("`{}` is not a finite number", symbol)))
}

fn malformed(message: String) -> MarketDataError {
    MarketDataError::MalformedResponse {
        provider: PROVIDER_ID.to_string(),
        message,
    }
}

fn transport_error(error: reqwest::Error) -> MarketDataError {
    if error.is_timeout() {
        MarketDataError::Timeout {
            provider: PROVIDER_ID.to_string(),
        }
    } else {
        MarketDataError::Network(error)
    }
}

#[async_trait]
impl MetalPriceFeed for MetalPriceApiFeed {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_per_gram(&self, currency: &str) -> Result<PerGramPrices, MarketDataError> {
        let url = self.request_url(currency);
        debug!("Requesting metal prices for {} from {}", currency, self.base_url);

        let response = self.client.get(&url).send().await.map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let body = response.text().await.map_err(transport_error)?;
        parse_metals_body(&body)
    }
}
