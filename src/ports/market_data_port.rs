//! Market data port trait.
//!
//! The engines make no assumptions about where opportunities and base
//! curves come from beyond the documented field ranges; sources sit behind
//! this trait (simulated in this crate, anything else in callers).

use crate::domain::error::BondPulseError;
use crate::domain::opportunity::TradeOpportunity;
use crate::domain::yield_curve::YieldCurvePoint;

pub trait MarketDataPort {
    /// Produce `count` trade opportunities within the documented field
    /// ranges, with distinct issuers per leg.
    fn opportunities(&mut self, count: usize) -> Result<Vec<TradeOpportunity>, BondPulseError>;

    /// Produce a base yield curve covering the fixed tenor list in order.
    fn base_yield_curve(&mut self) -> Result<Vec<YieldCurvePoint>, BondPulseError>;
}
