//! Zakat calculation domain models.

use rust_decimal::Decimal;
use serde::Serialize;
use zakat_market_data::MetalPriceQuote;

use crate::currency::CurrencyRef;

/// Zakat contribution of each category, at the flat rate.
///
/// `debts` is negative. Entries are reported even when the holder is below
/// nisab, so their sum need not match `zakat_due`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZakatBreakdown {
    pub cash: Decimal,
    pub bank: Decimal,
    pub gold: Decimal,
    pub silver: Decimal,
    pub investments: Decimal,
    pub shares: Decimal,
    pub business: Decimal,
    pub other: Decimal,
    pub debts: Decimal,
}

impl ZakatBreakdown {
    /// Sum of all entries, debts included.
    pub fn total(&self) -> Decimal {
        [
            self.cash,
            self.bank,
            self.gold,
            self.silver,
            self.investments,
            self.shares,
            self.business,
            self.other,
            self.debts,
        ]
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
    }
}

/// Result of a single calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZakatCalculation {
    pub total_assets: Decimal,
    pub total_deductions: Decimal,
    pub net_worth: Decimal,
    pub nisab_gold: Decimal,
    pub nisab_silver: Decimal,
    pub is_eligible: bool,
    pub zakat_due: Decimal,
    pub breakdown: ZakatBreakdown,
}

/// Grouping used for the wealth distribution view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SegmentKind {
    CashAndBank,
    Gold,
    Silver,
    Investments,
    Business,
    Other,
}

impl SegmentKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CashAndBank => "Cash & Bank",
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Investments => "Investments",
            Self::Business => "Business",
            Self::Other => "Other",
        }
    }
}

/// One slice of gross wealth, before debts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WealthSegment {
    pub kind: SegmentKind,
    pub value: Decimal,
    /// Percentage of gross wealth, 0-100.
    pub share: Decimal,
}

/// Everything needed to present a calculation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZakatReport {
    pub currency: CurrencyRef,
    pub prices: MetalPriceQuote,
    pub calculation: ZakatCalculation,
    pub distribution: Vec<WealthSegment>,
}
