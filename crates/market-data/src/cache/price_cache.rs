use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::errors::MarketDataError;
use crate::models::CachedPriceRecord;

use super::store::PriceCacheStore;

/// Fixed key of the single global price slot.
pub const CACHE_KEY: &str = "zakat_metal_prices";

/// How long a cached record stays valid.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Outcome of reading the cache slot for a currency.
#[derive(Clone, Debug, PartialEq)]
pub enum CacheLookup {
    /// Valid record for the requested currency.
    Hit(CachedPriceRecord),
    /// Nothing stored.
    Empty,
    /// A record exists but for another currency. It is left in place.
    CurrencyMismatch { cached: String },
    /// A record for this currency exists but is older than the TTL, or its
    /// capture time is so far off that the age cannot be represented (`None`).
    Expired { age: Option<chrono::Duration> },
}

/// Single-slot price cache over a [`PriceCacheStore`].
///
/// The slot is not partitioned by currency: a successful save for one
/// currency replaces the record for any other.
#[derive(Clone)]
pub struct PriceCache {
    store: Arc<dyn PriceCacheStore>,
    ttl: Duration,
}

impl PriceCache {
    pub fn new(store: Arc<dyn PriceCacheStore>) -> Self {
        Self::with_ttl(store, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(store: Arc<dyn PriceCacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn store(&self) -> Arc<dyn PriceCacheStore> {
        Arc::clone(&self.store)
    }

    /// Read the slot and check it against `currency` and `now`.
    pub fn lookup(
        &self,
        currency: &str,
        now: DateTime<Utc>,
    ) -> Result<CacheLookup, MarketDataError> {
        let Some(raw) = self.store.get(CACHE_KEY)? else {
            return Ok(CacheLookup::Empty);
        };
        let record: CachedPriceRecord = serde_json::from_str(&raw)?;

        if record.currency_code != currency {
            return Ok(CacheLookup::CurrencyMismatch {
                cached: record.currency_code,
            });
        }

        // A capture time in the future yields a negative age and stays valid.
        let Some(age_millis) = now
            .timestamp_millis()
            .checked_sub(record.captured_at_epoch_millis)
        else {
            return Ok(CacheLookup::Expired { age: None });
        };
        let ttl_millis = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        if age_millis < ttl_millis {
            Ok(CacheLookup::Hit(record))
        } else {
            Ok(CacheLookup::Expired {
                age: chrono::Duration::try_milliseconds(age_millis),
            })
        }
    }

    /// Overwrite the slot with `record`.
    pub fn save(&self, record: &CachedPriceRecord) -> Result<(), MarketDataError> {
        let json = serde_json::to_string(record)?;
        self.store.set(CACHE_KEY, &json)
    }
}
