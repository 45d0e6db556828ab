//! Metal price acquisition.
//!
//! [`MetalPriceService`] resolves a quote for a currency in three stages:
//!
//! 1. **Cache** - the persisted record, if it is for the same currency and
//!    younger than the TTL. No network call is made.
//! 2. **Feed** - the live metals feed, bounded by a timeout. A successful
//!    result overwrites the single cache slot.
//! 3. **Fallback** - static base prices converted by the reference exchange
//!    rate table, with jitter. Never cached.
//!
//! Every failure along the way is logged and recorded in
//! [`PriceDiagnostics`]; callers always receive a usable quote.

mod clock;
mod config;
mod diagnostics;

pub use clock::{Clock, SystemClock};
pub use config::{PriceServiceConfig, DEFAULT_FEED_TIMEOUT};
pub use diagnostics::{PriceDiagnostics, PriceStage, SkipReason, StageAttempt};

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::cache::{CacheLookup, PriceCache, PriceCacheStore};
use crate::errors::MarketDataError;
use crate::fallback::{FallbackPricing, JitterSource};
use crate::models::{CachedPriceRecord, MetalPriceQuote, PriceSource};
use crate::provider::metal_price_api::MetalPriceApiFeed;
use crate::provider::MetalPriceFeed;

/// Currency used when the caller passes an empty code.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Cache-then-feed-then-fallback price provider.
///
/// Cheap to share behind an `Arc`. Concurrent calls are not coordinated;
/// the last successful live fetch owns the cache slot.
pub struct MetalPriceService {
    feed: Option<Arc<dyn MetalPriceFeed>>,
    cache: PriceCache,
    fallback: FallbackPricing,
    clock: Arc<dyn Clock>,
    feed_timeout: Duration,
}

impl MetalPriceService {
    /// Service with no live feed, random jitter and the system clock.
    pub fn new(store: Arc<dyn PriceCacheStore>) -> Self {
        Self {
            feed: None,
            cache: PriceCache::new(store),
            fallback: FallbackPricing::default(),
            clock: Arc::new(SystemClock),
            feed_timeout: DEFAULT_FEED_TIMEOUT,
        }
    }

    /// Service wired from configuration. The HTTP feed is only attached when
    /// an API key is configured.
    pub fn from_config(config: &PriceServiceConfig, store: Arc<dyn PriceCacheStore>) -> Self {
        let mut service = Self::new(store)
            .with_cache_ttl(config.cache_ttl)
            .with_feed_timeout(config.request_timeout);

        if let Some(api_key) = &config.api_key {
            service = service.with_feed(Arc::new(MetalPriceApiFeed::with_options(
                api_key.clone(),
                config.feed_url.clone(),
                config.request_timeout,
            )));
        } else {
            info!("No metals API key configured; prices will come from cache or fallback");
        }

        service
    }

    pub fn with_feed(mut self, feed: Arc<dyn MetalPriceFeed>) -> Self {
        self.feed = Some(feed);
        self
    }

    pub fn with_jitter(mut self, jitter: Arc<dyn JitterSource>) -> Self {
        self.fallback = FallbackPricing::new(jitter);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = PriceCache::with_ttl(self.cache_store(), ttl);
        self
    }

    pub fn with_feed_timeout(mut self, timeout: Duration) -> Self {
        self.feed_timeout = timeout;
        self
    }

    fn cache_store(&self) -> Arc<dyn PriceCacheStore> {
        self.cache.store()
    }

    /// Current gold and silver prices per gram in `currency_code`.
    ///
    /// Always resolves to a quote.
    pub async fn get_prices(&self, currency_code: &str) -> MetalPriceQuote {
        let (quote, diagnostics) = self.get_prices_with_diagnostics(currency_code).await;
        if diagnostics.has_errors() {
            debug!("Price acquisition for {}: {}", quote.currency, diagnostics.summary());
        }
        quote
    }

    /// Like [`get_prices`](Self::get_prices), also returning a record of every
    /// stage attempted and every failure absorbed.
    pub async fn get_prices_with_diagnostics(
        &self,
        currency_code: &str,
    ) -> (MetalPriceQuote, PriceDiagnostics) {
        let currency = normalize_currency(currency_code);
        let mut diagnostics = PriceDiagnostics::new();

        if let Some(quote) = self.read_cache(&currency, self.clock.now(), &mut diagnostics) {
            return (quote, diagnostics);
        }

        if let Some(quote) = self.fetch_live(&currency, &mut diagnostics).await {
            return (quote, diagnostics);
        }

        let quote = self.fallback.quote(&currency, self.clock.now());
        diagnostics.record_success(PriceStage::Fallback);
        warn!(
            "Using fallback metal prices for {} ({})",
            currency,
            diagnostics.summary()
        );
        (quote, diagnostics)
    }

    fn read_cache(
        &self,
        currency: &str,
        now: DateTime<Utc>,
        diagnostics: &mut PriceDiagnostics,
    ) -> Option<MetalPriceQuote> {
        match self.cache.lookup(currency, now) {
            Ok(CacheLookup::Hit(record)) => {
                debug!("Metal price cache hit for {}", currency);
                diagnostics.record_success(PriceStage::CacheRead);
                Some(record.to_quote(now))
            }
            Ok(CacheLookup::Empty) => {
                diagnostics.record_skip(PriceStage::CacheRead, SkipReason::NoCachedRecord);
                None
            }
            Ok(CacheLookup::CurrencyMismatch { cached }) => {
                debug!("Cached metal prices are for {}, requested {}", cached, currency);
                diagnostics.record_skip(
                    PriceStage::CacheRead,
                    SkipReason::CurrencyMismatch { cached },
                );
                None
            }
            Ok(CacheLookup::Expired { age: Some(age) }) => {
                debug!(
                    "Cached metal prices for {} expired ({} minutes old)",
                    currency,
                    age.num_minutes()
                );
                diagnostics.record_skip(PriceStage::CacheRead, SkipReason::Expired);
                None
            }
            Ok(CacheLookup::Expired { age: None }) => {
                warn!(
                    "Cached metal prices for {} carry an out-of-range capture time",
                    currency
                );
                diagnostics.record_skip(PriceStage::CacheRead, SkipReason::Expired);
                None
            }
            Err(e) => {
                warn!("Failed to read cached metal prices: {}", e);
                diagnostics.record_error(PriceStage::CacheRead, e.to_string());
                None
            }
        }
    }

    async fn fetch_live(
        &self,
        currency: &str,
        diagnostics: &mut PriceDiagnostics,
    ) -> Option<MetalPriceQuote> {
        let Some(feed) = &self.feed else {
            diagnostics.record_skip(PriceStage::Feed, SkipReason::NoFeedConfigured);
            return None;
        };

        let result = match tokio::time::timeout(self.feed_timeout, feed.fetch_per_gram(currency))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(MarketDataError::Timeout {
                provider: feed.id().to_string(),
            }),
        };

        let prices = match result {
            Ok(prices) => prices,
            Err(e) => {
                warn!("Metal price feed {} failed for {}: {}", feed.id(), currency, e);
                diagnostics.record_error(PriceStage::Feed, e.to_string());
                return None;
            }
        };

        diagnostics.record_success(PriceStage::Feed);
        let quote =
            MetalPriceQuote::from_per_gram(prices, self.clock.now(), currency, PriceSource::Live);
        info!(
            "Fetched live metal prices for {} from {}: gold {} / silver {} per gram",
            currency,
            feed.id(),
            quote.gold_price_per_gram,
            quote.silver_price_per_gram
        );

        match self.cache.save(&CachedPriceRecord::from_quote(&quote)) {
            Ok(()) => diagnostics.record_success(PriceStage::CacheWrite),
            Err(e) => {
                warn!("Failed to persist metal prices: {}", e);
                diagnostics.record_error(PriceStage::CacheWrite, e.to_string());
            }
        }

        Some(quote)
    }
}

fn normalize_currency(code: &str) -> String {
    let code = code.trim();
    if code.is_empty() {
        DEFAULT_CURRENCY.to_string()
    } else {
        code.to_ascii_uppercase()
    }
}

#[cfg(test)]
mod tests;
