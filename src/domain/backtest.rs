//! Backtest engine: strategy filtering, trade simulation and summary stats.
//!
//! The simulator replays a filtered set of opportunities in input order.
//! Each trade realizes `potential_profit × U[0.5, 2.0)`, modelling random
//! slippage around the estimate; given the non-negative profit ranges the
//! loss branch is only reachable through the 0.8 win threshold, never
//! through negative P&L. Equity accumulates in full precision; only the
//! scalar summary fields and trade-log profits are rounded for display.

use rand::Rng;

use super::error::BondPulseError;
use super::metrics::{self, round2, WinLossRatio};
use super::opportunity::TradeOpportunity;

pub const INITIAL_EQUITY: f64 = 100_000.0;

/// An outcome at or above this fraction of the estimated profit counts as a win.
const WIN_THRESHOLD: f64 = 0.8;

/// Fixed thresholds of the Balanced strategy.
const BALANCED_MIN_PROFIT: f64 = 20.0;
const BALANCED_MAX_RISK: u8 = 60;

/// User-supplied thresholds for the Custom strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyParams {
    /// Minimum potential profit to trade, inclusive.
    pub min_profit: f64,
    /// Maximum risk score to trade, inclusive.
    pub max_risk: u8,
}

/// Strategy rule selecting which opportunities get traded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    Balanced,
    Custom(StrategyParams),
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Balanced => "Balanced",
            Strategy::Custom(_) => "Custom",
        }
    }

    /// Fail fast on out-of-range custom parameters before simulating.
    fn validate(&self) -> Result<(), BondPulseError> {
        if let Strategy::Custom(params) = self {
            if !params.min_profit.is_finite() || params.min_profit < 0.0 {
                return Err(BondPulseError::InvalidStrategyParam {
                    name: "min_profit".to_string(),
                    reason: "must be a non-negative finite number".to_string(),
                });
            }
            if params.max_risk > 100 {
                return Err(BondPulseError::InvalidStrategyParam {
                    name: "max_risk".to_string(),
                    reason: "must be at most 100".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Strategy predicate. Balanced uses strict fixed thresholds, Custom
    /// inclusive user-supplied ones.
    pub fn matches(&self, op: &TradeOpportunity) -> bool {
        match self {
            Strategy::Balanced => {
                op.potential_profit > BALANCED_MIN_PROFIT && op.risk_score < BALANCED_MAX_RISK
            }
            Strategy::Custom(params) => {
                op.potential_profit >= params.min_profit && op.risk_score <= params.max_risk
            }
        }
    }
}

/// One sample of the cumulative equity series.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    /// "Start" for the seed point, then "Trade 1", "Trade 2", ...
    pub label: String,
    pub equity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeStatus {
    Win,
    Loss,
}

impl std::fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TradeStatus::Win => "Win",
            TradeStatus::Loss => "Loss",
        })
    }
}

/// Per-trade log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    /// Id of the opportunity that produced the trade.
    pub id: usize,
    pub pair: String,
    /// Realized profit, rounded to 2 decimal places.
    pub profit: f64,
    pub status: TradeStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    /// Always `trades + 1` points: the seed point plus one per trade.
    pub equity_curve: Vec<EquityPoint>,
    pub trade_log: Vec<TradeRecord>,
    /// Total return in percent, 2 dp.
    pub total_return_pct: f64,
    /// Annualized Sharpe of the per-trade simple returns, 2 dp.
    pub sharpe_ratio: f64,
    /// Maximum drawdown in percent, 2 dp.
    pub max_drawdown_pct: f64,
    pub trades: usize,
    pub win_loss: WinLossRatio,
}

/// Run the backtest over `opportunities` under `strategy`.
///
/// The filter is stable: traded opportunities keep their input order. An
/// empty filtered set degrades to a seed-only equity curve with zeroed
/// statistics and the infinite win/loss sentinel.
pub fn run_backtest(
    opportunities: &[TradeOpportunity],
    strategy: &Strategy,
    rng: &mut impl Rng,
) -> Result<BacktestResult, BondPulseError> {
    strategy.validate()?;

    let filtered: Vec<&TradeOpportunity> = opportunities
        .iter()
        .filter(|op| strategy.matches(op))
        .collect();

    let mut equity = INITIAL_EQUITY;
    let mut wins = 0usize;
    let mut losses = 0usize;
    let mut equity_curve = Vec::with_capacity(filtered.len() + 1);
    equity_curve.push(EquityPoint {
        label: "Start".to_string(),
        equity,
    });
    let mut trade_log = Vec::with_capacity(filtered.len());

    for (i, op) in filtered.iter().enumerate() {
        let outcome = op.potential_profit * rng.gen_range(0.5..2.0);
        let status = if outcome >= op.potential_profit * WIN_THRESHOLD {
            wins += 1;
            TradeStatus::Win
        } else {
            losses += 1;
            TradeStatus::Loss
        };
        equity += outcome;
        equity_curve.push(EquityPoint {
            label: format!("Trade {}", i + 1),
            equity,
        });
        trade_log.push(TradeRecord {
            id: op.id,
            pair: op.pair_label(),
            profit: round2(outcome),
            status,
        });
    }

    let total_return_pct = (equity / INITIAL_EQUITY - 1.0) * 100.0;
    let returns: Vec<f64> = equity_curve
        .windows(2)
        .map(|w| w[1].equity / w[0].equity - 1.0)
        .collect();
    let sharpe = metrics::sharpe_ratio(&returns);
    let equity_values: Vec<f64> = equity_curve.iter().map(|p| p.equity).collect();
    let max_dd = metrics::max_drawdown_pct(&equity_values);

    Ok(BacktestResult {
        trades: filtered.len(),
        equity_curve,
        trade_log,
        total_return_pct: round2(total_return_pct),
        sharpe_ratio: round2(sharpe),
        max_drawdown_pct: round2(max_dd),
        win_loss: WinLossRatio::from_counts(wins, losses),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::opportunity::{ArbitrageType, BondLeg};
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_op(id: usize, profit: f64, risk: u8) -> TradeOpportunity {
        let leg = |issuer: &str| BondLeg {
            bond: format!("{issuer} 3.00% 2030 (AA+)"),
            issuer: issuer.to_string(),
            rating: "AA+".to_string(),
            duration: 4.0,
            yield_pct: 3.5,
        };
        TradeOpportunity {
            id,
            leg_a: leg("Apple Inc"),
            leg_b: leg("Toyota Motors"),
            arb_type: ArbitrageType::RelativeValue,
            liquidity: 5.0,
            potential_profit: profit,
            risk_score: risk,
        }
    }

    /// StepRng at minimum yields U = 0.5, the worst outcome multiplier.
    fn low_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    /// StepRng at maximum yields U just under 2.0, the best multiplier.
    fn high_rng() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn balanced_filter_thresholds() {
        let strategy = Strategy::Balanced;
        assert!(strategy.matches(&make_op(0, 25.0, 50)));
        // profit must be strictly above 20
        assert!(!strategy.matches(&make_op(1, 20.0, 50)));
        // risk must be strictly below 60
        assert!(!strategy.matches(&make_op(2, 25.0, 60)));
        assert!(!strategy.matches(&make_op(3, 15.0, 50)));
    }

    #[test]
    fn custom_filter_is_inclusive() {
        let strategy = Strategy::Custom(StrategyParams {
            min_profit: 10.0,
            max_risk: 80,
        });
        assert!(strategy.matches(&make_op(0, 10.0, 80)));
        assert!(!strategy.matches(&make_op(1, 9.99, 80)));
        assert!(!strategy.matches(&make_op(2, 10.0, 81)));
    }

    #[test]
    fn balanced_example_keeps_one_of_two() {
        let ops = vec![make_op(0, 25.0, 50), make_op(1, 15.0, 50)];
        let mut rng = StdRng::seed_from_u64(7);
        let result = run_backtest(&ops, &Strategy::Balanced, &mut rng).unwrap();
        assert_eq!(result.trades, 1);
        assert_eq!(result.equity_curve.len(), 2);
        assert_eq!(result.trade_log.len(), 1);
        assert_eq!(result.trade_log[0].id, 0);
    }

    #[test]
    fn custom_example_keeps_both() {
        let ops = vec![make_op(0, 25.0, 50), make_op(1, 15.0, 50)];
        let strategy = Strategy::Custom(StrategyParams {
            min_profit: 10.0,
            max_risk: 80,
        });
        let mut rng = StdRng::seed_from_u64(7);
        let result = run_backtest(&ops, &strategy, &mut rng).unwrap();
        assert_eq!(result.trades, 2);
        assert_eq!(result.equity_curve.len(), 3);
    }

    #[test]
    fn filter_preserves_input_order() {
        let ops = vec![
            make_op(3, 30.0, 10),
            make_op(1, 40.0, 20),
            make_op(2, 50.0, 30),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let result = run_backtest(&ops, &Strategy::Balanced, &mut rng).unwrap();
        let ids: Vec<usize> = result.trade_log.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn empty_filtered_set_degrades_gracefully() {
        let ops = vec![make_op(0, 5.0, 90)];
        let mut rng = StdRng::seed_from_u64(1);
        let result = run_backtest(&ops, &Strategy::Balanced, &mut rng).unwrap();
        assert_eq!(result.trades, 0);
        assert_eq!(result.equity_curve.len(), 1);
        assert_eq!(result.equity_curve[0].label, "Start");
        assert!((result.equity_curve[0].equity - INITIAL_EQUITY).abs() < f64::EPSILON);
        assert_eq!(result.total_return_pct, 0.0);
        assert_eq!(result.sharpe_ratio, 0.0);
        assert_eq!(result.max_drawdown_pct, 0.0);
        assert_eq!(result.win_loss, WinLossRatio::Infinite);
    }

    #[test]
    fn minimum_multiplier_classifies_as_loss() {
        // U = 0.5 gives outcome = 0.5 * profit, below the 0.8 threshold.
        let ops = vec![make_op(0, 30.0, 10)];
        let result = run_backtest(&ops, &Strategy::Balanced, &mut low_rng()).unwrap();
        assert_eq!(result.trade_log[0].status, TradeStatus::Loss);
        assert!((result.trade_log[0].profit - 15.0).abs() < 1e-9);
        assert_eq!(result.win_loss, WinLossRatio::Finite(0.0));
    }

    #[test]
    fn maximum_multiplier_classifies_as_win() {
        // U just under 2.0 gives outcome ~= 2 * profit, well above threshold.
        let ops = vec![make_op(0, 30.0, 10)];
        let result = run_backtest(&ops, &Strategy::Balanced, &mut high_rng()).unwrap();
        assert_eq!(result.trade_log[0].status, TradeStatus::Win);
        assert_eq!(result.win_loss, WinLossRatio::Infinite);
    }

    #[test]
    fn equity_accumulates_outcomes() {
        let ops = vec![make_op(0, 30.0, 10), make_op(1, 40.0, 10)];
        let result = run_backtest(&ops, &Strategy::Balanced, &mut low_rng()).unwrap();
        // Each outcome is 0.5 * profit: 15 and 20.
        assert!((result.equity_curve[1].equity - 100_015.0).abs() < 1e-9);
        assert!((result.equity_curve[2].equity - 100_035.0).abs() < 1e-9);
        assert_eq!(result.equity_curve[2].label, "Trade 2");
    }

    #[test]
    fn total_return_from_final_equity() {
        let ops = vec![make_op(0, 1000.0, 10)];
        let strategy = Strategy::Custom(StrategyParams {
            min_profit: 0.0,
            max_risk: 100,
        });
        let result = run_backtest(&ops, &strategy, &mut low_rng()).unwrap();
        // Final equity 100500: (100500 / 100000 - 1) * 100 = 0.5
        assert!((result.total_return_pct - 0.5).abs() < 1e-9);
    }

    #[test]
    fn non_negative_outcomes_mean_zero_drawdown() {
        let ops: Vec<TradeOpportunity> =
            (0..20).map(|i| make_op(i, 25.0 + i as f64, 10)).collect();
        let mut rng = StdRng::seed_from_u64(99);
        let result = run_backtest(&ops, &Strategy::Balanced, &mut rng).unwrap();
        assert_eq!(result.max_drawdown_pct, 0.0);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let ops: Vec<TradeOpportunity> = (0..10).map(|i| make_op(i, 30.0, 20)).collect();
        let a = run_backtest(&ops, &Strategy::Balanced, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = run_backtest(&ops, &Strategy::Balanced, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_negative_min_profit() {
        let strategy = Strategy::Custom(StrategyParams {
            min_profit: -1.0,
            max_risk: 50,
        });
        let err = run_backtest(&[], &strategy, &mut low_rng()).unwrap_err();
        assert!(matches!(
            err,
            BondPulseError::InvalidStrategyParam { ref name, .. } if name == "min_profit"
        ));
    }

    #[test]
    fn rejects_nan_min_profit() {
        let strategy = Strategy::Custom(StrategyParams {
            min_profit: f64::NAN,
            max_risk: 50,
        });
        assert!(run_backtest(&[], &strategy, &mut low_rng()).is_err());
    }

    #[test]
    fn rejects_out_of_range_max_risk() {
        let strategy = Strategy::Custom(StrategyParams {
            min_profit: 0.0,
            max_risk: 101,
        });
        let err = run_backtest(&[], &strategy, &mut low_rng()).unwrap_err();
        assert!(matches!(
            err,
            BondPulseError::InvalidStrategyParam { ref name, .. } if name == "max_risk"
        ));
    }

    #[test]
    fn trade_log_pair_labels() {
        let ops = vec![make_op(0, 30.0, 10)];
        let result = run_backtest(&ops, &Strategy::Balanced, &mut low_rng()).unwrap();
        assert_eq!(result.trade_log[0].pair, "Apple / Toyota");
    }
}
