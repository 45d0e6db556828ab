//! Zakat Core - declared wealth, zakat calculation, and currency helpers.
//!
//! Prices come from the `zakat-market-data` crate; this crate turns a
//! snapshot of declared wealth plus a price quote into a zakat result.

pub mod assets;
pub mod constants;
pub mod currency;
pub mod errors;
pub mod zakat;

pub use assets::*;
pub use currency::{default_currency, find_currency, format_currency, CurrencyRef, CURRENCIES};
pub use zakat::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
