//! Simulated yield-spread history with EWMA volatility.
//!
//! Models the historical spread between the two legs of a trade as a random
//! walk, with volatility tracked by an exponentially weighted recurrence:
//! `vol' = sqrt(omega + 0.8 vol^2 + 0.1 shock^2)`. The persistence and shock
//! weights sum below 1 so the series mean-reverts toward its long-run level
//! instead of exploding.

use rand::Rng;

use super::metrics::round2;

const VOL_PERSISTENCE: f64 = 0.8;
const SHOCK_WEIGHT: f64 = 0.1;
/// Long-run variance contribution: 0.1 * 0.1^2.
const OMEGA: f64 = 0.001;
/// Starting volatility level.
const INITIAL_VOL: f64 = 0.1;
/// Daily shocks are uniform in [-0.05, 0.05).
const SHOCK_SCALE: f64 = 0.1;

/// One day of simulated spread history.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadPoint {
    /// Days before today, counting down to 1.
    pub days_ago: u32,
    /// Yield spread in percentage points, 2 dp.
    pub spread: f64,
    /// EWMA volatility estimate, 2 dp.
    pub volatility: f64,
}

/// Simulate `days` of spread history between two leg yields.
pub fn simulate_spread_history(
    yield_a: f64,
    yield_b: f64,
    days: u32,
    rng: &mut impl Rng,
) -> Vec<SpreadPoint> {
    let mut spread = yield_a - yield_b;
    let mut vol = INITIAL_VOL;
    let mut history = Vec::with_capacity(days as usize);

    for days_ago in (1..=days).rev() {
        let shock = (rng.gen_range(0.0..1.0) - 0.5) * SHOCK_SCALE;
        spread += shock;
        vol = (OMEGA + VOL_PERSISTENCE * vol.powi(2) + SHOCK_WEIGHT * shock.powi(2)).sqrt();
        history.push(SpreadPoint {
            days_ago,
            spread: round2(spread),
            volatility: round2(vol),
        });
    }

    history
}
