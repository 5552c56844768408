//! Performance statistics shared by the backtest and frontier engines.
//!
//! Every ratio here has a documented zero-denominator fallback: Sharpe falls
//! back to 0 when the return series has no dispersion, drawdown is 0 for a
//! non-decreasing curve, and the win/loss ratio has a distinct infinite
//! sentinel so it never folds into a numeric value.

use std::fmt;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Round to two decimal places, used for display-facing outputs.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population standard deviation (divides by n, not n-1).
pub fn stddev_population(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let m = mean(xs);
    let variance = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64;
    variance.sqrt()
}

/// Annualized Sharpe ratio of a per-step simple return series.
///
/// Returns 0 when the series is empty or has zero dispersion.
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    let stddev = stddev_population(returns);
    if stddev > 0.0 {
        (mean(returns) / stddev) * TRADING_DAYS_PER_YEAR.sqrt()
    } else {
        0.0
    }
}

/// Maximum peak-to-trough decline over an equity series, in percent.
///
/// The running peak includes the first (seed) point, so a non-decreasing
/// curve always reports 0.
pub fn max_drawdown_pct(equity: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;
    for &value in equity {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let dd = (peak - value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd * 100.0
}

/// Wins over losses, with a sentinel for the lossless case.
///
/// `Infinite` is a tagged value distinct from any numeric ratio; it displays
/// as "inf" and never participates in float arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WinLossRatio {
    Finite(f64),
    Infinite,
}

impl WinLossRatio {
    pub fn from_counts(wins: usize, losses: usize) -> WinLossRatio {
        if losses > 0 {
            WinLossRatio::Finite(wins as f64 / losses as f64)
        } else {
            WinLossRatio::Infinite
        }
    }
}

impl fmt::Display for WinLossRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinLossRatio::Finite(ratio) => write!(f, "{:.2}", ratio),
            WinLossRatio::Infinite => f.write_str("inf"),
        }
    }
}
