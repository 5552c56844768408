#![allow(dead_code)]

use bondpulse::domain::error::BondPulseError;
use bondpulse::domain::opportunity::{ArbitrageType, BondLeg, TradeOpportunity};
use bondpulse::domain::yield_curve::{YieldCurvePoint, TENORS};
use bondpulse::ports::market_data_port::MarketDataPort;

pub fn make_leg(issuer: &str, rating: &str, duration: f64, yield_pct: f64) -> BondLeg {
    BondLeg {
        bond: format!("{issuer} 3.10% 2030 ({rating})"),
        issuer: issuer.to_string(),
        rating: rating.to_string(),
        duration,
        yield_pct,
    }
}

pub fn make_opportunity(id: usize, profit: f64, risk: u8) -> TradeOpportunity {
    TradeOpportunity {
        id,
        leg_a: make_leg("Apple Inc", "AAA", 4.5, 3.8),
        leg_b: make_leg("Verizon Comm.", "BBB+", 3.2, 4.1),
        arb_type: ArbitrageType::CreditSpread,
        liquidity: 6.0,
        potential_profit: profit,
        risk_score: risk,
    }
}

pub fn make_curve(yields: &[f64]) -> Vec<YieldCurvePoint> {
    yields
        .iter()
        .enumerate()
        .map(|(i, &y)| YieldCurvePoint {
            maturity: TENORS[i % TENORS.len()].to_string(),
            yield_pct: y,
            index: i,
        })
        .collect()
}

/// Market data port serving fixed fixtures instead of random draws.
pub struct MockMarketPort {
    pub opportunities: Vec<TradeOpportunity>,
    pub curve: Vec<YieldCurvePoint>,
}

impl MockMarketPort {
    pub fn new() -> Self {
        Self {
            opportunities: Vec::new(),
            curve: Vec::new(),
        }
    }

    pub fn with_opportunities(mut self, ops: Vec<TradeOpportunity>) -> Self {
        self.opportunities = ops;
        self
    }

    pub fn with_curve(mut self, curve: Vec<YieldCurvePoint>) -> Self {
        self.curve = curve;
        self
    }
}

impl MarketDataPort for MockMarketPort {
    fn opportunities(&mut self, count: usize) -> Result<Vec<TradeOpportunity>, BondPulseError> {
        Ok(self.opportunities.iter().take(count).cloned().collect())
    }

    fn base_yield_curve(&mut self) -> Result<Vec<YieldCurvePoint>, BondPulseError> {
        Ok(self.curve.clone())
    }
}
