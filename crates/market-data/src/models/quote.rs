use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which pricing stage produced a quote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceSource {
    /// Served from the persisted cache record.
    Cache,
    /// Fetched from the live metals feed.
    Live,
    /// Static base price converted by the reference exchange rate table.
    Fallback,
}

/// Gold and silver price per gram, as returned by a feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PerGramPrices {
    pub gold: Decimal,
    pub silver: Decimal,
}

/// Gold and silver prices per gram in a single currency.
///
/// Quotes are never mutated; a new quote supersedes the old one when the
/// currency changes or the cache expires.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalPriceQuote {
    /// Gold price per gram
    pub gold_price_per_gram: Decimal,

    /// Silver price per gram
    pub silver_price_per_gram: Decimal,

    /// When the prices were captured
    pub as_of: DateTime<Utc>,

    /// Currency code the prices are denominated in
    pub currency: String,

    /// Stage that produced the quote
    pub source: PriceSource,
}

impl MetalPriceQuote {
    /// Create a new quote.
    pub fn new(
        gold_price_per_gram: Decimal,
        silver_price_per_gram: Decimal,
        as_of: DateTime<Utc>,
        currency: impl Into<String>,
        source: PriceSource,
    ) -> Self {
        Self {
            gold_price_per_gram,
            silver_price_per_gram,
            as_of,
            currency: currency.into(),
            source,
        }
    }

    /// Build a quote from feed prices.
    pub fn from_per_gram(
        prices: PerGramPrices,
        as_of: DateTime<Utc>,
        currency: impl Into<String>,
        source: PriceSource,
    ) -> Self {
        Self::new(prices.gold, prices.silver, as_of, currency, source)
    }
}
