//! Simulated market data adapter.
//!
//! Manufactures synthetic opportunities and base curves from fixed issuer,
//! rating and arbitrage-type vocabularies. Field distributions:
//! potential profit in [5, 55], risk score 0..100, liquidity in [1, 10],
//! leg duration in [2, 7) years, leg yield in [2.5, 5.5) percent. The base
//! curve is a random walk from 2.5 with per-tenor drift in [-0.05, 0.25);
//! the walk accumulates unrounded and emits 2-dp yields.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::error::BondPulseError;
use crate::domain::metrics::round2;
use crate::domain::opportunity::{ArbitrageType, BondLeg, TradeOpportunity};
use crate::domain::yield_curve::{YieldCurvePoint, TENORS};
use crate::ports::market_data_port::MarketDataPort;

const ISSUERS: [&str; 8] = [
    "Apple Inc",
    "Govt. of USA",
    "Microsoft Corp",
    "JPMorgan Chase",
    "Ford Motor Co.",
    "Verizon Comm.",
    "Toyota Motors",
    "Pfizer Inc.",
];

const RATINGS: [&str; 6] = ["AAA", "AA+", "A-", "BBB+", "BB", "B+"];

pub struct SimMarketAdapter {
    rng: StdRng,
}

impl SimMarketAdapter {
    /// Adapter with a fresh entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Adapter with a fixed seed for reproducible data.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn make_leg(&mut self, issuer: &str) -> BondLeg {
        let rating = RATINGS[self.rng.gen_range(0..RATINGS.len())];
        let coupon = self.rng.gen_range(1.5..5.5);
        let year = 2026 + self.rng.gen_range(0..10);
        BondLeg {
            bond: format!("{issuer} {coupon:.2}% {year} ({rating})"),
            issuer: issuer.to_string(),
            rating: rating.to_string(),
            duration: round2(self.rng.gen_range(2.0..7.0)),
            yield_pct: round2(self.rng.gen_range(2.5..5.5)),
        }
    }
}

impl Default for SimMarketAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataPort for SimMarketAdapter {
    fn opportunities(&mut self, count: usize) -> Result<Vec<TradeOpportunity>, BondPulseError> {
        let mut opportunities = Vec::with_capacity(count);
        for id in 0..count {
            let issuer_a = ISSUERS[self.rng.gen_range(0..ISSUERS.len())];
            // Legs must reference distinct issuers.
            let issuer_b = loop {
                let candidate = ISSUERS[self.rng.gen_range(0..ISSUERS.len())];
                if candidate != issuer_a {
                    break candidate;
                }
            };

            let leg_a = self.make_leg(issuer_a);
            let leg_b = self.make_leg(issuer_b);
            let arb_type = ArbitrageType::ALL[self.rng.gen_range(0..ArbitrageType::ALL.len())];

            opportunities.push(TradeOpportunity {
                id,
                leg_a,
                leg_b,
                arb_type,
                liquidity: ((self.rng.gen_range(0.0f64..1.0) * 9.0 + 1.0) * 10.0).round() / 10.0,
                potential_profit: round2(self.rng.gen_range(0.05..0.55) * 100.0),
                risk_score: self.rng.gen_range(0..100),
            });
        }
        Ok(opportunities)
    }

    fn base_yield_curve(&mut self) -> Result<Vec<YieldCurvePoint>, BondPulseError> {
        let mut last_yield = 2.5;
        let curve = TENORS
            .iter()
            .enumerate()
            .map(|(index, &maturity)| {
                last_yield += self.rng.gen_range(0.0..1.0) * 0.3 - 0.05;
                YieldCurvePoint {
                    maturity: maturity.to_string(),
                    yield_pct: round2(last_yield),
                    index,
                }
            })
            .collect();
        Ok(curve)
    }
}
