//! Declared wealth domain models.

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Input category for declared wealth.
///
/// Ordered as the calculator form presents them. `Gold` and `Silver` are
/// entered in grams; every other category is an amount in the selected
/// currency. `Debts` is the only deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetCategory {
    Cash,
    BankBalance,
    Gold,
    Silver,
    Investments,
    Shares,
    BusinessAssets,
    OtherWealth,
    Debts,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 9] = [
        Self::Cash,
        Self::BankBalance,
        Self::Gold,
        Self::Silver,
        Self::Investments,
        Self::Shares,
        Self::BusinessAssets,
        Self::OtherWealth,
        Self::Debts,
    ];

    /// Field name in the serialized snapshot.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::BankBalance => "bankBalance",
            Self::Gold => "goldGrams",
            Self::Silver => "silverGrams",
            Self::Investments => "investments",
            Self::Shares => "shares",
            Self::BusinessAssets => "businessAssets",
            Self::OtherWealth => "otherWealth",
            Self::Debts => "debts",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash on Hand",
            Self::BankBalance => "Bank Balance",
            Self::Gold => "Gold (grams)",
            Self::Silver => "Silver (grams)",
            Self::Investments => "Investments",
            Self::Shares => "Business Shares",
            Self::BusinessAssets => "Business Assets",
            Self::OtherWealth => "Other Wealth",
            Self::Debts => "Debts to Deduct",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Cash => "Physical cash and currency you possess",
            Self::BankBalance => "Savings, checking, and fixed deposits",
            Self::Gold => "Gold jewelry, coins, and bars",
            Self::Silver => "Silver jewelry, coins, and bars",
            Self::Investments => "Stocks, mutual funds, bonds",
            Self::Shares => "Partnership shares and equity",
            Self::BusinessAssets => "Inventory, receivables, raw materials",
            Self::OtherWealth => "Any other zakatable assets",
            Self::Debts => "Outstanding loans and liabilities",
        }
    }

    /// Entered as a weight in grams rather than a currency amount.
    pub fn is_weight(&self) -> bool {
        matches!(self, Self::Gold | Self::Silver)
    }

    /// Subtracted from, rather than added to, net wealth.
    pub fn is_deduction(&self) -> bool {
        matches!(self, Self::Debts)
    }
}

/// A user's declared wealth at calculation time.
///
/// Amounts are in the selected currency except `gold_grams` and
/// `silver_grams`. Values are taken as given: negatives are not clamped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetSnapshot {
    pub cash: Decimal,
    pub bank_balance: Decimal,
    pub gold_grams: Decimal,
    pub silver_grams: Decimal,
    pub investments: Decimal,
    pub shares: Decimal,
    pub business_assets: Decimal,
    pub other_wealth: Decimal,
    pub debts: Decimal,
}

impl AssetSnapshot {
    /// Raw entered value for a category (grams for metals).
    pub fn value_of(&self, category: AssetCategory) -> Decimal {
        match category {
            AssetCategory::Cash => self.cash,
            AssetCategory::BankBalance => self.bank_balance,
            AssetCategory::Gold => self.gold_grams,
            AssetCategory::Silver => self.silver_grams,
            AssetCategory::Investments => self.investments,
            AssetCategory::Shares => self.shares,
            AssetCategory::BusinessAssets => self.business_assets,
            AssetCategory::OtherWealth => self.other_wealth,
            AssetCategory::Debts => self.debts,
        }
    }

    pub fn set(&mut self, category: AssetCategory, value: Decimal) {
        let slot = match category {
            AssetCategory::Cash => &mut self.cash,
            AssetCategory::BankBalance => &mut self.bank_balance,
            AssetCategory::Gold => &mut self.gold_grams,
            AssetCategory::Silver => &mut self.silver_grams,
            AssetCategory::Investments => &mut self.investments,
            AssetCategory::Shares => &mut self.shares,
            AssetCategory::BusinessAssets => &mut self.business_assets,
            AssetCategory::OtherWealth => &mut self.other_wealth,
            AssetCategory::Debts => &mut self.debts,
        };
        *slot = value;
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, category: AssetCategory, value: Decimal) -> Self {
        self.set(category, value);
        self
    }

    /// Convert floating-point form input, rejecting NaN and infinities.
    pub fn try_from_f64(inputs: &AssetInputs) -> Result<Self> {
        let mut snapshot = Self::default();
        for category in AssetCategory::ALL {
            let raw = inputs.value_of(category);
            let value = Decimal::from_f64(raw).ok_or(ValidationError::NonFiniteAmount {
                field: category.key(),
            })?;
            snapshot.set(category, value);
        }
        Ok(snapshot)
    }
}

/// Floating-point form of [`AssetSnapshot`], as entered in a form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetInputs {
    pub cash: f64,
    pub bank_balance: f64,
    pub gold_grams: f64,
    pub silver_grams: f64,
    pub investments: f64,
    pub shares: f64,
    pub business_assets: f64,
    pub other_wealth: f64,
    pub debts: f64,
}

impl AssetInputs {
    pub fn value_of(&self, category: AssetCategory) -> f64 {
        match category {
            AssetCategory::Cash => self.cash,
            AssetCategory::BankBalance => self.bank_balance,
            AssetCategory::Gold => self.gold_grams,
            AssetCategory::Silver => self.silver_grams,
            AssetCategory::Investments => self.investments,
            AssetCategory::Shares => self.shares,
            AssetCategory::BusinessAssets => self.business_assets,
            AssetCategory::OtherWealth => self.other_wealth,
            AssetCategory::Debts => self.debts,
        }
    }
}

impl TryFrom<AssetInputs> for AssetSnapshot {
    type Error = crate::Error;

    fn try_from(inputs: AssetInputs) -> Result<Self> {
        Self::try_from_f64(&inputs)
    }
}
