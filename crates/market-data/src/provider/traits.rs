//! Metal price feed trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::PerGramPrices;

/// A live source of gold and silver prices.
///
/// Implement this trait to plug a new metals API into
/// [`MetalPriceService`](crate::MetalPriceService). Feeds report failures
/// through `MarketDataError`; the service decides how to recover.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use zakat_market_data::provider::MetalPriceFeed;
///
/// struct StaticFeed;
///
/// #[async_trait]
/// impl MetalPriceFeed for StaticFeed {
///     fn id(&self) -> &'static str {
///         "STATIC"
///     }
///
///     async fn fetch_per_gram(&self, currency: &str) -> Result<PerGramPrices, MarketDataError> {
///         Ok(PerGramPrices { gold: dec!(80), silver: dec!(1) })
///     }
/// }
/// ```
#[async_trait]
pub trait MetalPriceFeed: Send + Sync {
    /// Unique identifier for this feed, used in logs and diagnostics.
    fn id(&self) -> &'static str;

    /// Fetch the current gold and silver price per gram in `currency`.
    async fn fetch_per_gram(&self, currency: &str) -> Result<PerGramPrices, MarketDataError>;
}
