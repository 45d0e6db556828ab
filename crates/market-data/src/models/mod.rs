//! Market data models
//!
//! - `quote` - Metal price quotes (MetalPriceQuote, PerGramPrices, PriceSource)
//! - `record` - Persisted cache record (CachedPriceRecord)

mod quote;
mod record;

pub use quote::{MetalPriceQuote, PerGramPrices, PriceSource};
pub use record::CachedPriceRecord;
