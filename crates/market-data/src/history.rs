//! Simulated price history.
//!
//! The metals feed only serves latest prices, so dashboard series are
//! generated as a gentle upward trend around the current price with uniform
//! noise.

use chrono::{Duration, NaiveDate};
use num_traits::FromPrimitive;
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Daily trend increment.
const DAILY_TREND: Decimal = dec!(0.0001);

/// One day of a price series.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: Decimal,
}

/// Generate `days + 1` daily points ending at `today`, oldest first.
///
/// `volatility` is the full width of the noise band (0.02 = ±1%). Days that
/// fall before the earliest representable date are left out, and prices
/// saturate at the `Decimal` range.
pub fn generate_price_history<R: Rng>(
    days: u32,
    base_price: Decimal,
    volatility: Decimal,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<PricePoint> {
    let reachable = today.signed_duration_since(NaiveDate::MIN).num_days();
    let oldest = u32::try_from(reachable).map_or(days, |r| r.min(days));

    (0..=oldest)
        .rev()
        .filter_map(|days_ago| {
            let date = today.checked_sub_signed(Duration::days(i64::from(days_ago)))?;
            let elapsed = Decimal::from(days - days_ago);
            let trend = Decimal::ONE.saturating_add(elapsed.saturating_mul(DAILY_TREND));
            let sample = Decimal::from_f64(rng.gen::<f64>()).unwrap_or(dec!(0.5));
            let spread = (sample - dec!(0.5)).saturating_mul(volatility);
            let noise = Decimal::ONE.saturating_add(spread);

            Some(PricePoint {
                date,
                price: base_price
                    .saturating_mul(trend)
                    .saturating_mul(noise)
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            })
        })
        .collect()
}

/// Percent change from the first to the last point.
///
/// Zero when there are fewer than two points or the first price is zero.
pub fn price_change_percent(history: &[PricePoint]) -> Decimal {
    match (history.first(), history.last()) {
        (Some(first), Some(last)) if history.len() > 1 && !first.price.is_zero() => {
            let change = last.price.saturating_sub(first.price);
            match change.checked_div(first.price) {
                Some(ratio) => ratio.saturating_mul(dec!(100)),
                None if change.is_sign_negative() != first.price.is_sign_negative() => {
                    Decimal::MIN
                }
                None => Decimal::MAX,
            }
        }
        _ => Decimal::ZERO,
    }
}
