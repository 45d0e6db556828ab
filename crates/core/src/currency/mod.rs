//! Currency catalog and amount formatting.

mod format;

pub use format::format_currency;

use serde::Serialize;

use crate::constants::DEFAULT_CURRENCY_CODE;

/// A selectable currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyRef {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub flag: &'static str,
}

/// Supported currencies, in selector order.
pub const CURRENCIES: &[CurrencyRef] = &[
    CurrencyRef {
        code: "USD",
        name: "US Dollar",
        symbol: "$",
        flag: "🇺🇸",
    },
    CurrencyRef {
        code: "BDT",
        name: "Bangladeshi Taka",
        symbol: "৳",
        flag: "🇧🇩",
    },
    CurrencyRef {
        code: "EUR",
        name: "Euro",
        symbol: "€",
        flag: "🇪🇺",
    },
    CurrencyRef {
        code: "GBP",
        name: "British Pound",
        symbol: "£",
        flag: "🇬🇧",
    },
    CurrencyRef {
        code: "INR",
        name: "Indian Rupee",
        symbol: "₹",
        flag: "🇮🇳",
    },
    CurrencyRef {
        code: "PKR",
        name: "Pakistani Rupee",
        symbol: "₨",
        flag: "🇵🇰",
    },
    CurrencyRef {
        code: "SAR",
        name: "Saudi Riyal",
        symbol: "﷼",
        flag: "🇸🇦",
    },
    CurrencyRef {
        code: "AED",
        name: "UAE Dirham",
        symbol: "د.إ",
        flag: "🇦🇪",
    },
    CurrencyRef {
        code: "MYR",
        name: "Malaysian Ringgit",
        symbol: "RM",
        flag: "🇲🇾",
    },
    CurrencyRef {
        code: "IDR",
        name: "Indonesian Rupiah",
        symbol: "Rp",
        flag: "🇮🇩",
    },
];

/// Look up a currency by code, ignoring case and surrounding whitespace.
pub fn find_currency(code: &str) -> Option<&'static CurrencyRef> {
    let code = code.trim();
    CURRENCIES
        .iter()
        .find(|currency| currency.code.eq_ignore_ascii_case(code))
}

/// The currency selected by default.
pub fn default_currency() -> &'static CurrencyRef {
    find_currency(DEFAULT_CURRENCY_CODE).unwrap_or(&CURRENCIES[0])
}
