//! Tests for MetalPriceService stage ordering and failure absorption.
//!
//! # Contract Points
//!
//! 1. A valid cached record short-circuits the feed
//! 2. Live results overwrite the single cache slot
//! 3. Feed failures, store failures and timeouts never escape `get_prices`
//! 4. Fallback quotes are never cached

use super::*;
use crate::cache::{InMemoryPriceStore, CACHE_KEY};
use crate::fallback::{FixedJitter, RandomJitter, BASE_GOLD_PRICE_USD, BASE_SILVER_PRICE_USD};
use crate::models::PerGramPrices;
use async_trait::async_trait;
use chrono::TimeZone;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Mutex;

// =========================================================================
// Mocks
// =========================================================================

#[derive(Clone, Copy)]
enum FeedBehavior {
    Respond(PerGramPrices),
    Fail,
    Hang,
}

struct MockFeed {
    behavior: Mutex<FeedBehavior>,
    requests: Mutex<Vec<String>>,
}

impl MockFeed {
    fn new(behavior: FeedBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior: Mutex::new(behavior),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn responding(gold: Decimal, silver: Decimal) -> Arc<Self> {
        Self::new(FeedBehavior::Respond(PerGramPrices { gold, silver }))
    }

    fn set_behavior(&self, behavior: FeedBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetalPriceFeed for MockFeed {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn fetch_per_gram(&self, currency: &str) -> Result<PerGramPrices, MarketDataError> {
        self.requests.lock().unwrap().push(currency.to_string());
        let behavior = *self.behavior.lock().unwrap();
        match behavior {
            FeedBehavior::Respond(prices) => Ok(prices),
            FeedBehavior::Fail => Err(MarketDataError::ProviderError {
                provider: "MOCK".to_string(),
                message: "HTTP 503".to_string(),
            }),
            FeedBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Err(MarketDataError::ProviderError {
                    provider: "MOCK".to_string(),
                    message: "unreachable".to_string(),
                })
            }
        }
    }
}

#[derive(Default)]
struct FlakyStore {
    inner: InMemoryPriceStore,
    fail_get: bool,
    fail_set: bool,
}

impl PriceCacheStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, MarketDataError> {
        if self.fail_get {
            return Err(MarketDataError::Cache("Intentional read failure".into()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MarketDataError> {
        if self.fail_set {
            return Err(MarketDataError::Cache("Intentional write failure".into()));
        }
        self.inner.set(key, value)
    }
}

struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    fn starting_at(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

fn service_with(
    store: Arc<dyn PriceCacheStore>,
    feed: Arc<MockFeed>,
    clock: Arc<ManualClock>,
) -> MetalPriceService {
    MetalPriceService::new(store)
        .with_feed(feed)
        .with_clock(clock)
        .with_jitter(Arc::new(FixedJitter(Decimal::ONE)))
}

// =========================================================================
// Cache and live feed
// =========================================================================

#[tokio::test]
async fn test_live_fetch_then_cache_hit() {
    let store = Arc::new(InMemoryPriceStore::new());
    let feed = MockFeed::responding(dec!(80), dec!(1.0));
    let clock = ManualClock::starting_at(start_time());
    let service = service_with(store.clone(), feed.clone(), clock.clone());

    let first = service.get_prices("USD").await;
    assert_eq!(first.gold_price_per_gram, dec!(80));
    assert_eq!(first.silver_price_per_gram, dec!(1.0));
    assert_eq!(first.source, PriceSource::Live);
    assert!(store.get(CACHE_KEY).unwrap().is_some());

    clock.advance(chrono::Duration::hours(23));
    let second = service.get_prices("USD").await;
    assert_eq!(second.gold_price_per_gram, dec!(80));
    assert_eq!(second.silver_price_per_gram, dec!(1.0));
    assert_eq!(second.source, PriceSource::Cache);
    assert_eq!(second.as_of, start_time());
    assert_eq!(feed.calls(), 1);
}

#[tokio::test]
async fn test_expired_cache_refetches() {
    let store = Arc::new(InMemoryPriceStore::new());
    let feed = MockFeed::responding(dec!(80), dec!(1));
    let clock = ManualClock::starting_at(start_time());
    let service = service_with(store, feed.clone(), clock.clone());

    service.get_prices("USD").await;
    feed.set_behavior(FeedBehavior::Respond(PerGramPrices {
        gold: dec!(82),
        silver: dec!(1.1),
    }));
    clock.advance(chrono::Duration::hours(24));

    let (quote, diagnostics) = service.get_prices_with_diagnostics("USD").await;
    assert_eq!(quote.gold_price_per_gram, dec!(82));
    assert_eq!(quote.source, PriceSource::Live);
    assert_eq!(feed.calls(), 2);
    assert_eq!(diagnostics.attempts[0].skipped, Some(SkipReason::Expired));
}

#[tokio::test]
async fn test_currency_switch_overwrites_single_slot() {
    let store = Arc::new(InMemoryPriceStore::new());
    let feed = MockFeed::responding(dec!(80), dec!(1));
    let clock = ManualClock::starting_at(start_time());
    let service = service_with(store, feed.clone(), clock);

    service.get_prices("USD").await;
    let (eur, diagnostics) = service.get_prices_with_diagnostics("EUR").await;
    assert_eq!(eur.currency, "EUR");
    assert_eq!(eur.source, PriceSource::Live);
    assert_eq!(
        diagnostics.attempts[0].skipped,
        Some(SkipReason::CurrencyMismatch {
            cached: "USD".to_string()
        })
    );

    // The EUR fetch replaced the USD record.
    let usd = service.get_prices("USD").await;
    assert_eq!(usd.source, PriceSource::Live);
    assert_eq!(feed.requested(), vec!["USD", "EUR", "USD"]);
}

#[tokio::test]
async fn test_currency_code_is_normalized() {
    let store = Arc::new(InMemoryPriceStore::new());
    let feed = MockFeed::responding(dec!(80), dec!(1));
    let service = service_with(store, feed.clone(), ManualClock::starting_at(start_time()));

    let quote = service.get_prices(" usd ").await;
    assert_eq!(quote.currency, "USD");

    let cached = service.get_prices("USD").await;
    assert_eq!(cached.source, PriceSource::Cache);

    let default = service.get_prices("").await;
    assert_eq!(default.currency, DEFAULT_CURRENCY);
    assert_eq!(feed.requested(), vec!["USD"]);
}

// =========================================================================
// Failure absorption
// =========================================================================

#[tokio::test]
async fn test_feed_failure_falls_back_within_jitter_band() {
    let store = Arc::new(InMemoryPriceStore::new());
    let feed = MockFeed::new(FeedBehavior::Fail);
    let service = MetalPriceService::new(store.clone())
        .with_feed(feed)
        .with_jitter(Arc::new(RandomJitter));

    let (quote, diagnostics) = service.get_prices_with_diagnostics("USD").await;
    assert_eq!(quote.source, PriceSource::Fallback);
    assert!(quote.gold_price_per_gram >= dec!(75.5) * dec!(0.98));
    assert!(quote.gold_price_per_gram <= dec!(75.5) * dec!(1.02));
    assert!(quote.silver_price_per_gram >= dec!(0.92) * dec!(0.98));
    assert!(quote.silver_price_per_gram <= dec!(0.92) * dec!(1.02));
    assert_eq!(diagnostics.errors().len(), 1);
    assert_eq!(diagnostics.succeeded_stage(), Some(PriceStage::Fallback));

    // Fallback quotes are not cached.
    assert_eq!(store.get(CACHE_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_fallback_with_pinned_jitter_is_exact() {
    let service = MetalPriceService::new(Arc::new(InMemoryPriceStore::new()))
        .with_feed(MockFeed::new(FeedBehavior::Fail))
        .with_jitter(Arc::new(FixedJitter(dec!(0.99))));

    let quote = service.get_prices("SAR").await;
    assert_eq!(
        quote.gold_price_per_gram,
        BASE_GOLD_PRICE_USD * dec!(3.75) * dec!(0.99)
    );
    assert_eq!(
        quote.silver_price_per_gram,
        BASE_SILVER_PRICE_USD * dec!(3.75) * dec!(0.99)
    );
}

#[tokio::test]
async fn test_no_feed_configured_uses_fallback() {
    let service = MetalPriceService::new(Arc::new(InMemoryPriceStore::new()))
        .with_jitter(Arc::new(FixedJitter(Decimal::ONE)));

    let (quote, diagnostics) = service.get_prices_with_diagnostics("GBP").await;
    assert_eq!(quote.gold_price_per_gram, dec!(75.5) * dec!(0.79));
    assert!(diagnostics
        .attempts
        .iter()
        .any(|a| a.skipped == Some(SkipReason::NoFeedConfigured)));
    assert!(!diagnostics.has_errors());
}

#[tokio::test]
async fn test_hanging_feed_times_out_to_fallback() {
    let service = MetalPriceService::new(Arc::new(InMemoryPriceStore::new()))
        .with_feed(MockFeed::new(FeedBehavior::Hang))
        .with_jitter(Arc::new(FixedJitter(Decimal::ONE)))
        .with_feed_timeout(Duration::from_millis(20));

    let (quote, diagnostics) = service.get_prices_with_diagnostics("USD").await;
    assert_eq!(quote.source, PriceSource::Fallback);
    let errors = diagnostics.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, PriceStage::Feed);
    assert!(errors[0].1.contains("Timeout"));
}

#[tokio::test]
async fn test_store_read_failure_is_treated_as_miss() {
    let store = Arc::new(FlakyStore {
        fail_get: true,
        ..Default::default()
    });
    let feed = MockFeed::responding(dec!(80), dec!(1));
    let service = service_with(store, feed.clone(), ManualClock::starting_at(start_time()));

    let (quote, diagnostics) = service.get_prices_with_diagnostics("USD").await;
    assert_eq!(quote.source, PriceSource::Live);
    assert_eq!(diagnostics.errors()[0].0, PriceStage::CacheRead);

    // Every call misses the cache while reads keep failing.
    service.get_prices("USD").await;
    assert_eq!(feed.calls(), 2);
}

#[tokio::test]
async fn test_store_write_failure_still_returns_live_quote() {
    let store = Arc::new(FlakyStore {
        fail_set: true,
        ..Default::default()
    });
    let feed = MockFeed::responding(dec!(80), dec!(1));
    let service = service_with(store, feed, ManualClock::starting_at(start_time()));

    let (quote, diagnostics) = service.get_prices_with_diagnostics("USD").await;
    assert_eq!(quote.gold_price_per_gram, dec!(80));
    assert_eq!(quote.source, PriceSource::Live);
    assert_eq!(diagnostics.errors()[0].0, PriceStage::CacheWrite);
}

#[tokio::test]
async fn test_corrupt_cache_record_is_a_miss() {
    let store = Arc::new(InMemoryPriceStore::new());
    store.set(CACHE_KEY, "not a record").unwrap();
    let feed = MockFeed::responding(dec!(80), dec!(1));
    let service = service_with(store.clone(), feed, ManualClock::starting_at(start_time()));

    let quote = service.get_prices("USD").await;
    assert_eq!(quote.source, PriceSource::Live);

    // The live fetch replaced the corrupt record.
    let raw = store.get(CACHE_KEY).unwrap().unwrap();
    let record: CachedPriceRecord = serde_json::from_str(&raw).unwrap();
    assert_eq!(record.currency_code, "USD");
}

#[tokio::test]
async fn test_out_of_range_capture_time_is_a_miss() {
    let store = Arc::new(InMemoryPriceStore::new());
    store
        .set(
            CACHE_KEY,
            r#"{"goldPricePerGram":1,"silverPricePerGram":1,"capturedAtEpochMillis":-9223372036854775808,"currencyCode":"USD"}"#,
        )
        .unwrap();
    let feed = MockFeed::responding(dec!(80), dec!(1));
    let service = service_with(
        store.clone(),
        feed.clone(),
        ManualClock::starting_at(start_time()),
    );

    let (quote, diagnostics) = service.get_prices_with_diagnostics("USD").await;
    assert_eq!(quote.source, PriceSource::Live);
    assert_eq!(quote.gold_price_per_gram, dec!(80));
    assert_eq!(feed.calls(), 1);
    assert_eq!(diagnostics.attempts[0].skipped, Some(SkipReason::Expired));

    let raw = store.get(CACHE_KEY).unwrap().unwrap();
    let record: CachedPriceRecord = serde_json::from_str(&raw).unwrap();
    assert_eq!(record.captured_at_epoch_millis, start_time().timestamp_millis());
}

// =========================================================================
// Concurrency and configuration
// =========================================================================

#[tokio::test]
async fn test_concurrent_requests_resolve_independently() {
    let store = Arc::new(InMemoryPriceStore::new());
    let feed = MockFeed::responding(dec!(80), dec!(1));
    let service = Arc::new(service_with(
        store.clone(),
        feed.clone(),
        ManualClock::starting_at(start_time()),
    ));

    let (usd, inr) = tokio::join!(service.get_prices("USD"), service.get_prices("INR"));
    assert_eq!(usd.currency, "USD");
    assert_eq!(inr.currency, "INR");
    assert_eq!(feed.calls(), 2);

    // Whichever write landed last owns the slot.
    let raw = store.get(CACHE_KEY).unwrap().unwrap();
    let record: CachedPriceRecord = serde_json::from_str(&raw).unwrap();
    assert!(record.currency_code == "USD" || record.currency_code == "INR");
}

#[tokio::test]
async fn test_from_config_without_key_skips_feed() {
    let config = PriceServiceConfig::default();
    let service = MetalPriceService::from_config(&config, Arc::new(InMemoryPriceStore::new()));

    let (quote, diagnostics) = service.get_prices_with_diagnostics("USD").await;
    assert_eq!(quote.source, PriceSource::Fallback);
    assert_eq!(
        diagnostics.attempts[1].skipped,
        Some(SkipReason::NoFeedConfigured)
    );
}

#[tokio::test]
async fn test_cache_ttl_is_configurable() {
    let store = Arc::new(InMemoryPriceStore::new());
    let feed = MockFeed::responding(dec!(80), dec!(1));
    let clock = ManualClock::starting_at(start_time());
    let service = service_with(store, feed.clone(), clock.clone())
        .with_cache_ttl(Duration::from_secs(60 * 60));

    service.get_prices("USD").await;
    clock.advance(chrono::Duration::minutes(59));
    assert_eq!(service.get_prices("USD").await.source, PriceSource::Cache);
    clock.advance(chrono::Duration::minutes(1));
    assert_eq!(service.get_prices("USD").await.source, PriceSource::Live);
    assert_eq!(feed.calls(), 2);
}
