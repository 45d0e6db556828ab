//! Zakat calculation.
//!
//! Pure and total: every representable input produces a result. Arithmetic
//! saturates at the decimal range instead of panicking.

use rust_decimal::Decimal;
use zakat_market_data::MetalPriceQuote;

use crate::assets::AssetSnapshot;
use crate::constants::{NISAB_GOLD_GRAMS, NISAB_SILVER_GRAMS, ZAKAT_RATE};

use super::zakat_model::{ZakatBreakdown, ZakatCalculation};

/// Market value of the declared gold and silver.
pub(crate) fn metal_values(assets: &AssetSnapshot, prices: &MetalPriceQuote) -> (Decimal, Decimal) {
    (
        assets.gold_grams.saturating_mul(prices.gold_price_per_gram),
        assets.silver_grams.saturating_mul(prices.silver_price_per_gram),
    )
}

/// Nisab thresholds `(gold, silver)` in the quote currency.
pub fn nisab_thresholds(prices: &MetalPriceQuote) -> (Decimal, Decimal) {
    (
        NISAB_GOLD_GRAMS.saturating_mul(prices.gold_price_per_gram),
        NISAB_SILVER_GRAMS.saturating_mul(prices.silver_price_per_gram),
    )
}

fn at_rate(value: Decimal) -> Decimal {
    value.saturating_mul(ZAKAT_RATE)
}

/// Calculate zakat for `assets` at `prices`.
///
/// Eligibility is always judged against the silver nisab; the gold nisab is
/// reported alongside but does not affect the outcome.
pub fn calculate(assets: &AssetSnapshot, prices: &MetalPriceQuote) -> ZakatCalculation {
    let (gold_value, silver_value) = metal_values(assets, prices);

    let total_assets = [
        assets.cash,
        assets.bank_balance,
        gold_value,
        silver_value,
        assets.investments,
        assets.shares,
        assets.business_assets,
        assets.other_wealth,
    ]
    .into_iter()
    .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v));

    let total_deductions = assets.debts;
    let net_worth = total_assets.saturating_sub(total_deductions);

    let (nisab_gold, nisab_silver) = nisab_thresholds(prices);
    let is_eligible = net_worth >= nisab_silver;
    let zakat_due = if is_eligible {
        at_rate(net_worth)
    } else {
        Decimal::ZERO
    };

    ZakatCalculation {
        total_assets,
        total_deductions,
        net_worth,
        nisab_gold,
        nisab_silver,
        is_eligible,
        zakat_due,
        breakdown: ZakatBreakdown {
            cash: at_rate(assets.cash),
            bank: at_rate(assets.bank_balance),
            gold: at_rate(gold_value),
            silver: at_rate(silver_value),
            investments: at_rate(assets.investments),
            shares: at_rate(assets.shares),
            business: at_rate(assets.business_assets),
            other: at_rate(assets.other_wealth),
            debts: at_rate(-assets.debts),
        },
    }
}
