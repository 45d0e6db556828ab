use std::sync::Arc;

use log::debug;
use zakat_market_data::{MetalPriceQuote, MetalPriceService};

use crate::assets::AssetSnapshot;
use crate::currency::{find_currency, CurrencyRef};
use crate::errors::{Error, Result};

use super::calculator::calculate;
use super::distribution::wealth_distribution;
use super::zakat_model::ZakatReport;

/// Fetches prices for a currency and runs the calculator.
pub struct ZakatService {
    prices: Arc<MetalPriceService>,
}

impl ZakatService {
    pub fn new(prices: Arc<MetalPriceService>) -> Self {
        Self { prices }
    }

    fn resolve_currency(currency_code: &str) -> Result<&'static CurrencyRef> {
        find_currency(currency_code)
            .ok_or_else(|| Error::UnsupportedCurrency(currency_code.to_string()))
    }

    /// Current metal prices in a catalog currency.
    pub async fn prices_for(&self, currency_code: &str) -> Result<MetalPriceQuote> {
        let currency = Self::resolve_currency(currency_code)?;
        Ok(self.prices.get_prices(currency.code).await)
    }

    /// Calculate zakat on `assets` declared in `currency_code`.
    ///
    /// Fails only for currencies outside the catalog; price acquisition
    /// itself always yields a quote.
    pub async fn calculate_for(
        &self,
        assets: &AssetSnapshot,
        currency_code: &str,
    ) -> Result<ZakatReport> {
        let currency = Self::resolve_currency(currency_code)?;
        let prices = self.prices.get_prices(currency.code).await;
        let calculation = calculate(assets, &prices);
        debug!(
            "Zakat for {}: net worth {}, eligible {}, due {} ({:?} prices)",
            currency.code,
            calculation.net_worth,
            calculation.is_eligible,
            calculation.zakat_due,
            prices.source
        );

        Ok(ZakatReport {
            currency: *currency,
            distribution: wealth_distribution(assets, &prices),
            prices,
            calculation,
        })
    }
}
