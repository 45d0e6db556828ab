//! Persisted price cache.
//!
//! - [`PriceCacheStore`] - the host's key-value storage (get/set by key)
//! - [`InMemoryPriceStore`] / [`FilePriceStore`] - bundled stores
//! - [`PriceCache`] - the single-slot, TTL-checked view used by the price service

mod file_store;
mod price_cache;
mod store;

pub use file_store::FilePriceStore;
pub use price_cache::{CacheLookup, PriceCache, CACHE_KEY, DEFAULT_CACHE_TTL};
pub use store::{InMemoryPriceStore, PriceCacheStore};
