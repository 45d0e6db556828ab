//! Gross wealth split into display segments.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use zakat_market_data::MetalPriceQuote;

use crate::assets::AssetSnapshot;

use super::calculator::metal_values;
use super::zakat_model::{SegmentKind, WealthSegment};

/// Split gross wealth (debts excluded) into segments.
///
/// Segments with no positive value are omitted; an empty list is returned
/// when there is nothing to show.
pub fn wealth_distribution(assets: &AssetSnapshot, prices: &MetalPriceQuote) -> Vec<WealthSegment> {
    let (gold_value, silver_value) = metal_values(assets, prices);

    let values = [
        (
            SegmentKind::CashAndBank,
            assets.cash.saturating_add(assets.bank_balance),
        ),
        (SegmentKind::Gold, gold_value),
        (SegmentKind::Silver, silver_value),
        (
            SegmentKind::Investments,
            assets.investments.saturating_add(assets.shares),
        ),
        (SegmentKind::Business, assets.business_assets),
        (SegmentKind::Other, assets.other_wealth),
    ];

    let positive: Vec<(SegmentKind, Decimal)> = values
        .into_iter()
        .filter(|(_, value)| *value > Decimal::ZERO)
        .collect();

    let total = positive
        .iter()
        .fold(Decimal::ZERO, |acc, (_, v)| acc.saturating_add(*v));
    if total.is_zero() {
        return Vec::new();
    }

    positive
        .into_iter()
        .map(|(kind, value)| WealthSegment {
            kind,
            value,
            share: (value / total * dec!(100)).round_dp(4),
        })
        .collect()
}
