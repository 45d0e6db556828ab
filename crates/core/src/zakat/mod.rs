//! Zakat module - calculator, result models, and the pricing façade.

mod calculator;
mod distribution;
mod zakat_model;
mod zakat_service;

pub use calculator::{calculate, nisab_thresholds};
pub use distribution::wealth_distribution;
pub use zakat_model::{
    SegmentKind, WealthSegment, ZakatBreakdown, ZakatCalculation, ZakatReport,
};
pub use zakat_service::ZakatService;
