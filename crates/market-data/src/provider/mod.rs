//! Live metal price feeds.
//!
//! This module contains:
//! - The `MetalPriceFeed` trait every live source implements
//! - The HTTP metals API feed

mod traits;

pub mod metal_price_api;

pub use traits::MetalPriceFeed;
