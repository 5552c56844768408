//! Trade opportunity representation.
//!
//! A [`TradeOpportunity`] is a candidate two-leg relative-value trade between
//! two fixed-income instruments. Leg A is the buy side, leg B the sell side;
//! the two legs always reference distinct issuers. Opportunities are created
//! once by a market-data source and are read-only thereafter.

use std::fmt;

/// The fixed enumeration of arbitrage styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArbitrageType {
    CashAndCarry,
    YieldCurve,
    CreditSpread,
    RelativeValue,
}

impl ArbitrageType {
    pub const ALL: [ArbitrageType; 4] = [
        ArbitrageType::CashAndCarry,
        ArbitrageType::YieldCurve,
        ArbitrageType::CreditSpread,
        ArbitrageType::RelativeValue,
    ];
}

impl fmt::Display for ArbitrageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArbitrageType::CashAndCarry => "Cash-and-Carry",
            ArbitrageType::YieldCurve => "Yield Curve",
            ArbitrageType::CreditSpread => "Credit Spread",
            ArbitrageType::RelativeValue => "Relative Value",
        };
        f.write_str(label)
    }
}

/// One side of a two-leg trade.
#[derive(Debug, Clone, PartialEq)]
pub struct BondLeg {
    /// Display name, e.g. "Apple Inc 3.25% 2031 (AAA)".
    pub bond: String,
    pub issuer: String,
    pub rating: String,
    /// Modified duration in years, positive.
    pub duration: f64,
    /// Yield in percent, positive.
    pub yield_pct: f64,
}

impl BondLeg {
    /// First word of the issuer name, used in compact trade-pair labels.
    pub fn short_name(&self) -> &str {
        self.issuer.split_whitespace().next().unwrap_or(&self.issuer)
    }
}

/// A candidate two-leg trade: buy leg A, sell leg B.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOpportunity {
    pub id: usize,
    pub leg_a: BondLeg,
    pub leg_b: BondLeg,
    pub arb_type: ArbitrageType,
    /// Liquidity score in [1, 10].
    pub liquidity: f64,
    /// Estimated profit in currency units per 100k notional, non-negative.
    pub potential_profit: f64,
    /// Integer risk score in [0, 100].
    pub risk_score: u8,
}

impl TradeOpportunity {
    /// Compact label for trade logs, e.g. "Apple / Verizon".
    pub fn pair_label(&self) -> String {
        format!("{} / {}", self.leg_a.short_name(), self.leg_b.short_name())
    }

    /// Duration mismatch between the legs in years.
    pub fn duration_gap(&self) -> f64 {
        self.leg_a.duration - self.leg_b.duration
    }

    /// Yield pickup of leg A over leg B in percentage points.
    pub fn yield_spread(&self) -> f64 {
        self.leg_a.yield_pct - self.leg_b.yield_pct
    }
}
