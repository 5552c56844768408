//! Monte Carlo exploration of the risk/return portfolio frontier.
//!
//! The frontier is sampled, not solved: each draw normalizes independent
//! uniform weights over the candidate assets and scores the portfolio with
//! freshly drawn per-asset return and risk. Normalizing uniforms skews the
//! draws toward the simplex center versus a true Dirichlet(1,..,1) sample;
//! downstream consumers depend on that sampling method, so it is kept as is.

use rand::Rng;

use super::error::BondPulseError;

/// Simulated per-asset expected return range, as a fraction per period.
const RETURN_RANGE: std::ops::Range<f64> = -0.02..0.08;
/// Simulated per-asset risk (standard deviation) range.
const RISK_RANGE: std::ops::Range<f64> = 0.05..0.25;

/// One sampled portfolio on the frontier scatter.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontierSample {
    /// Portfolio volatility in percent.
    pub volatility: f64,
    /// Portfolio expected return in percent.
    pub expected_return: f64,
    /// Return over volatility, 0 when volatility is 0.
    pub sharpe: f64,
    /// Weights over the candidate assets, summing to 1.
    pub weights: Vec<f64>,
}

/// The sampled frontier plus its two distinguished portfolios.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontier {
    pub points: Vec<FrontierSample>,
    pub min_volatility: Option<FrontierSample>,
    pub max_sharpe: Option<FrontierSample>,
}

impl Frontier {
    fn empty() -> Frontier {
        Frontier {
            points: Vec::new(),
            min_volatility: None,
            max_sharpe: None,
        }
    }
}

/// Draw weights over `n` assets, redrawing the degenerate all-zero case so
/// normalization never divides by zero.
fn draw_weights(n: usize, rng: &mut impl Rng) -> Vec<f64> {
    loop {
        let mut weights: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..1.0)).collect();
        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            for w in &mut weights {
                *w /= total;
            }
            return weights;
        }
    }
}

/// Sample `samples` random portfolios over `asset_ids` and select the
/// minimum-volatility and maximum-Sharpe draws.
///
/// Per-asset return and risk are redrawn on every sample rather than fixed
/// per asset, modelling full-sample noise. Selection is a linear scan with
/// ties broken by first occurrence in draw order. Zero assets yield an
/// empty frontier with both selections absent; a zero sample count is
/// rejected at the boundary.
pub fn explore_frontier(
    asset_ids: &[String],
    samples: usize,
    rng: &mut impl Rng,
) -> Result<Frontier, BondPulseError> {
    if samples == 0 {
        return Err(BondPulseError::ZeroSampleCount);
    }
    if asset_ids.is_empty() {
        return Ok(Frontier::empty());
    }

    let n = asset_ids.len();
    let mut points = Vec::with_capacity(samples);

    for _ in 0..samples {
        let weights = draw_weights(n, rng);

        let mut expected_return = 0.0;
        let mut variance = 0.0;
        for &w in &weights {
            let asset_return = rng.gen_range(RETURN_RANGE);
            let asset_risk = rng.gen_range(RISK_RANGE);
            expected_return += w * asset_return;
            variance += (w * asset_risk).powi(2);
        }
        let volatility = variance.sqrt();
        let sharpe = if volatility > 0.0 {
            expected_return / volatility
        } else {
            0.0
        };

        points.push(FrontierSample {
            volatility: volatility * 100.0,
            expected_return: expected_return * 100.0,
            sharpe,
            weights,
        });
    }

    let mut min_vol = &points[0];
    let mut max_sharpe = &points[0];
    for point in &points[1..] {
        if point.volatility < min_vol.volatility {
            min_vol = point;
        }
        if point.sharpe > max_sharpe.sharpe {
            max_sharpe = point;
        }
    }
    let min_volatility = Some(min_vol.clone());
    let max_sharpe = Some(max_sharpe.clone());

    Ok(Frontier {
        points,
        min_volatility,
        max_sharpe,
    })
}
