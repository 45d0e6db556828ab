//! Stage tracking for a single price acquisition.

use std::fmt;

/// Pricing stage attempted during [`get_prices`](crate::MetalPriceService::get_prices).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceStage {
    CacheRead,
    Feed,
    CacheWrite,
    Fallback,
}

impl fmt::Display for PriceStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CacheRead => write!(f, "CACHE_READ"),
            Self::Feed => write!(f, "FEED"),
            Self::CacheWrite => write!(f, "CACHE_WRITE"),
            Self::Fallback => write!(f, "FALLBACK"),
        }
    }
}

/// Why a stage did not produce a quote without failing outright.
#[derive(Clone, Debug, PartialEq)]
pub enum SkipReason {
    /// The cache slot is empty.
    NoCachedRecord,

    /// The cache slot holds another currency.
    CurrencyMismatch { cached: String },

    /// The cached record is older than the TTL.
    Expired,

    /// No live feed is configured (e.g. no API key).
    NoFeedConfigured,
}

/// Record of a single stage.
#[derive(Clone, Debug)]
pub struct StageAttempt {
    pub stage: PriceStage,
    pub skipped: Option<SkipReason>,
    pub error: Option<String>,
    pub success: bool,
}

/// Everything that happened while producing one quote.
///
/// `get_prices` never fails; this is where the failures it absorbed end up.
#[derive(Clone, Debug, Default)]
pub struct PriceDiagnostics {
    pub attempts: Vec<StageAttempt>,
}

impl PriceDiagnostics {
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    pub fn record_skip(&mut self, stage: PriceStage, reason: SkipReason) {
        self.attempts.push(StageAttempt {
            stage,
            skipped: Some(reason),
            error: None,
            success: false,
        });
    }

    pub fn record_error(&mut self, stage: PriceStage, error: String) {
        self.attempts.push(StageAttempt {
            stage,
            skipped: None,
            error: Some(error),
            success: false,
        });
    }

    pub fn record_success(&mut self, stage: PriceStage) {
        self.attempts.push(StageAttempt {
            stage,
            skipped: None,
            error: None,
            success: true,
        });
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        self.attempts
            .iter()
            .map(|a| {
                if a.success {
                    format!("{}: SUCCESS", a.stage)
                } else if let Some(skip) = &a.skipped {
                    format!("{}: SKIPPED ({:?})", a.stage, skip)
                } else if let Some(err) = &a.error {
                    format!("{}: ERROR ({})", a.stage, err)
                } else {
                    format!("{}: UNKNOWN", a.stage)
                }
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Stage that produced the quote, if any succeeded.
    pub fn succeeded_stage(&self) -> Option<PriceStage> {
        self.attempts
            .iter()
            .filter(|a| a.success && a.stage != PriceStage::CacheWrite)
            .map(|a| a.stage)
            .last()
    }

    /// Get all errors.
    pub fn errors(&self) -> Vec<(PriceStage, &str)> {
        self.attempts
            .iter()
            .filter_map(|a| a.error.as_ref().map(|e| (a.stage, e.as_str())))
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.attempts.iter().any(|a| a.error.is_some())
    }
}
