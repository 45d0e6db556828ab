use std::env;
use std::time::Duration;

use log::warn;

use crate::cache::DEFAULT_CACHE_TTL;
use crate::provider::metal_price_api::DEFAULT_FEED_URL;

/// Default bound on a single live feed call.
pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(10);

const ENV_API_KEY: &str = "ZAKAT_METALS_API_KEY";
const ENV_API_URL: &str = "ZAKAT_METALS_API_URL";
const ENV_TIMEOUT_SECS: &str = "ZAKAT_PRICE_TIMEOUT_SECS";
const ENV_CACHE_TTL_HOURS: &str = "ZAKAT_PRICE_CACHE_TTL_HOURS";

/// Settings for [`MetalPriceService`](crate::MetalPriceService).
#[derive(Clone, Debug, PartialEq)]
pub struct PriceServiceConfig {
    /// Metals API key. Without one the live feed is skipped.
    pub api_key: Option<String>,
    /// Endpoint for latest prices.
    pub feed_url: String,
    /// Bound on a single feed call.
    pub request_timeout: Duration,
    /// Validity window of the cached record.
    pub cache_ttl: Duration,
}

impl Default for PriceServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            feed_url: DEFAULT_FEED_URL.to_string(),
            request_timeout: DEFAULT_FEED_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl PriceServiceConfig {
    /// Load settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_key = lookup(ENV_API_KEY)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let feed_url = lookup(ENV_API_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.feed_url);

        let request_timeout = parse_u64(&lookup, ENV_TIMEOUT_SECS)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let cache_ttl = parse_u64(&lookup, ENV_CACHE_TTL_HOURS)
            .map(|hours| Duration::from_secs(hours.saturating_mul(60 * 60)))
            .unwrap_or(defaults.cache_ttl);

        Self {
            api_key,
            feed_url,
            request_timeout,
            cache_ttl,
        }
    }
}

fn parse_u64<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            warn!("Ignoring invalid {}='{}', using default", key, raw);
            None
        }
    }
}
