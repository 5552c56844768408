//! Aggregate statistics over a set of opportunities.

use super::opportunity::{ArbitrageType, TradeOpportunity};

/// Buy-leg averages over a filtered opportunity set.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    pub count: usize,
    pub avg_duration: f64,
    pub avg_yield: f64,
    pub avg_liquidity: f64,
}

/// Average leg-A duration, yield and liquidity. All zeros when empty.
pub fn summarize(opportunities: &[TradeOpportunity]) -> PortfolioSummary {
    let count = opportunities.len();
    if count == 0 {
        return PortfolioSummary {
            count: 0,
            avg_duration: 0.0,
            avg_yield: 0.0,
            avg_liquidity: 0.0,
        };
    }

    let n = count as f64;
    let sum = |f: fn(&TradeOpportunity) -> f64| opportunities.iter().map(f).sum::<f64>() / n;
    PortfolioSummary {
        count,
        avg_duration: sum(|op| op.leg_a.duration),
        avg_yield: sum(|op| op.leg_a.yield_pct),
        avg_liquidity: sum(|op| op.liquidity),
    }
}

/// Opportunity counts per arbitrage type, in enum order, zero counts omitted.
pub fn composition_by_type(opportunities: &[TradeOpportunity]) -> Vec<(ArbitrageType, usize)> {
    ArbitrageType::ALL
        .iter()
        .filter_map(|&t| {
            let count = opportunities.iter().filter(|op| op.arb_type == t).count();
            (count > 0).then_some((t, count))
        })
        .collect()
}
