//! Static fallback pricing.
//!
//! Used when neither the cache nor the live feed can supply prices. Base USD
//! prices are converted through a reference exchange rate table and nudged by
//! a small multiplicative jitter so the displayed prices still move.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use num_traits::FromPrimitive;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{MetalPriceQuote, PriceSource};

/// Gold base price, USD per gram (~$2350/oz).
pub const BASE_GOLD_PRICE_USD: Decimal = dec!(75.5);

/// Silver base price, USD per gram (~$28.5/oz).
pub const BASE_SILVER_PRICE_USD: Decimal = dec!(0.92);

/// Lower bound of the jitter multiplier.
pub const JITTER_MIN: Decimal = dec!(0.98);

/// Upper bound of the jitter multiplier.
pub const JITTER_MAX: Decimal = dec!(1.02);

/// Reference rates, units of currency per USD.
const EXCHANGE_RATES: &[(&str, Decimal)] = &[
    ("USD", dec!(1)),
    ("BDT", dec!(109.5)),
    ("EUR", dec!(0.92)),
    ("GBP", dec!(0.79)),
    ("INR", dec!(83.12)),
    ("PKR", dec!(278.5)),
    ("SAR", dec!(3.75)),
    ("AED", dec!(3.67)),
    ("MYR", dec!(4.47)),
    ("IDR", dec!(15650)),
];

/// Reference exchange rate for `currency`, or 1 for unknown codes.
pub fn exchange_rate(currency: &str) -> Decimal {
    EXCHANGE_RATES
        .iter()
        .find(|(code, _)| *code == currency)
        .map(|(_, rate)| *rate)
        .unwrap_or(Decimal::ONE)
}

/// Source of the fallback jitter multiplier.
pub trait JitterSource: Send + Sync {
    /// A multiplier, expected within [`JITTER_MIN`, `JITTER_MAX`].
    fn multiplier(&self) -> Decimal;
}

/// Uniform jitter from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomJitter;

impl JitterSource for RandomJitter {
    fn multiplier(&self) -> Decimal {
        let sample = rand::thread_rng().gen_range(0.98..=1.02);
        Decimal::from_f64(sample)
            .map(|m| m.round_dp(6))
            .unwrap_or(Decimal::ONE)
    }
}

/// Constant jitter, for deterministic pricing.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub Decimal);

impl JitterSource for FixedJitter {
    fn multiplier(&self) -> Decimal {
        self.0
    }
}

/// Computes fallback quotes from the static base prices.
#[derive(Clone)]
pub struct FallbackPricing {
    gold_usd: Decimal,
    silver_usd: Decimal,
    jitter: Arc<dyn JitterSource>,
}

impl Default for FallbackPricing {
    fn default() -> Self {
        Self::new(Arc::new(RandomJitter))
    }
}

impl FallbackPricing {
    pub fn new(jitter: Arc<dyn JitterSource>) -> Self {
        Self {
            gold_usd: BASE_GOLD_PRICE_USD,
            silver_usd: BASE_SILVER_PRICE_USD,
            jitter,
        }
    }

    /// Fallback quote for `currency`. The same multiplier applies to both metals.
    pub fn quote(&self, currency: &str, now: DateTime<Utc>) -> MetalPriceQuote {
        let rate = exchange_rate(currency);
        let variation = self.jitter.multiplier().clamp(JITTER_MIN, JITTER_MAX);

        MetalPriceQuote::new(
            self.gold_usd * rate * variation,
            self.silver_usd * rate * variation,
            now,
            currency,
            PriceSource::Fallback,
        )
    }
}
