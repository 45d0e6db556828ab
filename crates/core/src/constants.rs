use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Gold nisab in grams (~7.5 tola)
pub const NISAB_GOLD_GRAMS: Decimal = dec!(87.48);

/// Silver nisab in grams (~52.5 tola)
pub const NISAB_SILVER_GRAMS: Decimal = dec!(612.36);

/// Zakat rate on qualifying net wealth (2.5%)
pub const ZAKAT_RATE: Decimal = dec!(0.025);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Currency selected when none is chosen
pub const DEFAULT_CURRENCY_CODE: &str = "USD";
