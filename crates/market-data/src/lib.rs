//! Zakat Market Data Crate
//!
//! Precious metal pricing for the zakat calculator.
//!
//! # Overview
//!
//! ```text
//!                  get_prices("EUR")
//!                         |
//!                         v
//!                +------------------+   hit
//!                |   PriceCache     | -------> MetalPriceQuote (CACHE)
//!                +------------------+
//!                         | miss / expired / error
//!                         v
//!                +------------------+   ok    (save to cache)
//!                |  MetalPriceFeed  | -------> MetalPriceQuote (LIVE)
//!                +------------------+
//!                         | error / timeout / no feed
//!                         v
//!                +------------------+
//!                | FallbackPricing  | -------> MetalPriceQuote (FALLBACK)
//!                +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`MetalPriceService`] - Resolves quotes, never fails
//! - [`MetalPriceQuote`] - Gold and silver price per gram in one currency
//! - [`PriceCacheStore`] - Host key-value storage for the cached record
//! - [`MetalPriceFeed`] - Live price source
//! - [`JitterSource`] - Randomness for fallback prices

pub mod cache;
pub mod errors;
pub mod fallback;
pub mod history;
pub mod models;
pub mod provider;
pub mod service;

pub use models::{CachedPriceRecord, MetalPriceQuote, PerGramPrices, PriceSource};

pub use cache::{
    CacheLookup, FilePriceStore, InMemoryPriceStore, PriceCache, PriceCacheStore, CACHE_KEY,
};
pub use errors::MarketDataError;
pub use fallback::{exchange_rate, FallbackPricing, FixedJitter, JitterSource, RandomJitter};
pub use history::{generate_price_history, price_change_percent, PricePoint};
pub use provider::metal_price_api::MetalPriceApiFeed;
pub use provider::MetalPriceFeed;
pub use service::{
    Clock, MetalPriceService, PriceDiagnostics, PriceServiceConfig, PriceStage, SkipReason,
    SystemClock,
};
