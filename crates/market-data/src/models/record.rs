use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::quote::{MetalPriceQuote, PriceSource};

/// Persisted form of the last live quote.
///
/// Stored as JSON in a single global cache slot. Field names match the record
/// the browser build writes to local storage so both can share a store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedPriceRecord {
    pub gold_price_per_gram: Decimal,
    pub silver_price_per_gram: Decimal,
    pub captured_at_epoch_millis: i64,
    pub currency_code: String,
}

impl CachedPriceRecord {
    /// Capture a quote for persistence.
    pub fn from_quote(quote: &MetalPriceQuote) -> Self {
        Self {
            gold_price_per_gram: quote.gold_price_per_gram,
            silver_price_per_gram: quote.silver_price_per_gram,
            captured_at_epoch_millis: quote.as_of.timestamp_millis(),
            currency_code: quote.currency.clone(),
        }
    }

    /// Capture time as a UTC timestamp, or `None` if the stored value is out of range.
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.captured_at_epoch_millis)
            .single()
    }

    /// Rebuild a quote from the record.
    pub fn to_quote(&self, fallback_as_of: DateTime<Utc>) -> MetalPriceQuote {
        MetalPriceQuote::new(
            self.gold_price_per_gram,
            self.silver_price_per_gram,
            self.captured_at().unwrap_or(fallback_as_of),
            self.currency_code.clone(),
            PriceSource::Cache,
        )
    }
}
