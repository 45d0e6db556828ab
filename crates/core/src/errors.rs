//! Core error types for the zakat engine.
//!
//! The calculator itself has no error path. Errors only arise at the input
//! boundary (floating-point amounts) and when resolving a currency code.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the zakat engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Currency '{0}' is not supported")]
    UnsupportedCurrency(String),
}

/// Input validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// NaN, infinite, or too large to represent as a decimal amount.
    #[error("{field} must be a finite amount")]
    NonFiniteAmount { field: &'static str },
}
