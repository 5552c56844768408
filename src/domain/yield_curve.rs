//! Yield curve representation and stress scenarios.
//!
//! Scenarios are additive shifts on top of the base yield: parallel moves
//! shift every tenor by the same amount, slope moves scale with the tenor's
//! position in the curve so the short end stays anchored.

use std::fmt;

/// The fixed tenor ordering every base curve covers, short end first.
pub const TENORS: [&str; 11] = [
    "1M", "3M", "6M", "1Y", "2Y", "3Y", "5Y", "7Y", "10Y", "20Y", "30Y",
];

/// Maximum slope shift applied to the longest tenor under Steepener/Flattener.
const SLOPE_SHIFT: f64 = 0.75;
/// Uniform shift under the parallel scenarios.
const PARALLEL_SHIFT: f64 = 0.5;

/// One point on a base yield curve.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldCurvePoint {
    /// Maturity label from [`TENORS`].
    pub maturity: String,
    /// Yield in percent.
    pub yield_pct: f64,
    /// Position in the tenor ordering, used as the slope interpolation weight.
    pub index: usize,
}

/// A curve point with its stressed yield alongside the original.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioCurvePoint {
    pub maturity: String,
    pub yield_pct: f64,
    pub index: usize,
    pub scenario_yield: f64,
}

/// Named yield-curve stress scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scenario {
    #[default]
    None,
    ParallelUp,
    ParallelDown,
    Steepener,
    Flattener,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::None,
        Scenario::ParallelUp,
        Scenario::ParallelDown,
        Scenario::Steepener,
        Scenario::Flattener,
    ];

    /// Parse a scenario name. Unknown names map to `None` rather than failing.
    pub fn parse(name: &str) -> Scenario {
        match name {
            "Parallel Up" => Scenario::ParallelUp,
            "Parallel Down" => Scenario::ParallelDown,
            "Steepener" => Scenario::Steepener,
            "Flattener" => Scenario::Flattener,
            _ => Scenario::None,
        }
    }

    /// Additive yield shift for the point at `index` on a curve of
    /// `curve_len` points.
    fn shift(&self, index: usize, curve_len: usize) -> f64 {
        match self {
            Scenario::None => 0.0,
            Scenario::ParallelUp => PARALLEL_SHIFT,
            Scenario::ParallelDown => -PARALLEL_SHIFT,
            Scenario::Steepener => SLOPE_SHIFT * index as f64 / curve_len as f64,
            Scenario::Flattener => -SLOPE_SHIFT * index as f64 / curve_len as f64,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Scenario::None => "None",
            Scenario::ParallelUp => "Parallel Up",
            Scenario::ParallelDown => "Parallel Down",
            Scenario::Steepener => "Steepener",
            Scenario::Flattener => "Flattener",
        };
        f.write_str(label)
    }
}

/// Apply a stress scenario to a base curve.
///
/// Pure transform: input order and length are preserved, shifts depend only
/// on the point's index and the scenario, and stressed yields are rounded to
/// two decimal places.
pub fn apply_scenario(curve: &[YieldCurvePoint], scenario: Scenario) -> Vec<ScenarioCurvePoint> {
    let len = curve.len();
    curve
        .iter()
        .map(|point| {
            let shifted = point.yield_pct + scenario.shift(point.index, len);
            ScenarioCurvePoint {
                maturity: point.maturity.clone(),
                yield_pct: point.yield_pct,
                index: point.index,
                scenario_yield: super::metrics::round2(shifted),
            }
        })
        .collect()
}
