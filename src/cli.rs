//! CLI definition and dispatch.
//!
//! Thin outer adapter over the domain engines: subcommands generate
//! simulated market data, run one engine and print a plain-text report.
//! An optional INI profile supplies defaults; flags override it.

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::settings_adapter::Settings;
use crate::adapters::sim_market_adapter::SimMarketAdapter;
use crate::domain::backtest::{run_backtest, Strategy, StrategyParams};
use crate::domain::error::BondPulseError;
use crate::domain::frontier::explore_frontier;
use crate::domain::spread::simulate_spread_history;
use crate::domain::summary;
use crate::domain::yield_curve::{apply_scenario, Scenario};
use crate::ports::market_data_port::MarketDataPort;

#[derive(Parser, Debug)]
#[command(name = "bondpulse", about = "Fixed-income relative-value analytics")]
pub struct Cli {
    /// INI settings profile supplying defaults for all subcommands.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List simulated trade opportunities
    Opportunities {
        #[arg(long)]
        count: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a strategy backtest over simulated opportunities
    Backtest {
        /// "balanced" or "custom"
        #[arg(long)]
        strategy: Option<String>,
        #[arg(long)]
        min_profit: Option<f64>,
        #[arg(long)]
        max_risk: Option<u8>,
        #[arg(long)]
        count: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Print the per-trade log after the summary
        #[arg(long)]
        log: bool,
    },
    /// Apply a stress scenario to a simulated base curve
    Scenario {
        /// Scenario name; unknown names fall back to "None"
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Simulate the historical yield spread for one opportunity
    Spread {
        /// Opportunity id to inspect
        #[arg(long, default_value_t = 0)]
        id: usize,
        /// History length in days
        #[arg(long, default_value_t = 90)]
        days: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Explore the sampled risk/return portfolio frontier
    Frontier {
        #[arg(long)]
        samples: Option<usize>,
        #[arg(long)]
        assets: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// "max-sharpe" or "min-vol"
        #[arg(long)]
        target: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let settings = match load_settings(cli.config.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let result = match cli.command {
        Command::Opportunities { count, seed } => run_opportunities(&settings, count, seed),
        Command::Backtest {
            strategy,
            min_profit,
            max_risk,
            count,
            seed,
            log,
        } => run_backtest_cmd(&settings, strategy, min_profit, max_risk, count, seed, log),
        Command::Scenario { name, seed } => run_scenario(&settings, name, seed),
        Command::Spread { id, days, seed } => run_spread(&settings, id, days, seed),
        Command::Frontier {
            samples,
            assets,
            seed,
            target,
        } => run_frontier(&settings, samples, assets, seed, target),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, BondPulseError> {
    match path {
        Some(p) => {
            eprintln!("Loading settings from {}", p.display());
            Settings::from_file(p)
        }
        None => Ok(Settings::default()),
    }
}

fn make_adapter(seed: Option<u64>) -> SimMarketAdapter {
    match seed {
        Some(s) => SimMarketAdapter::seeded(s),
        None => SimMarketAdapter::new(),
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn run_opportunities(
    settings: &Settings,
    count: Option<usize>,
    seed: Option<u64>,
) -> Result<(), BondPulseError> {
    let count = count.unwrap_or(settings.opportunity_count);
    let seed = seed.or(settings.seed);
    let ops = make_adapter(seed).opportunities(count)?;

    println!(
        "{:<32} {:<14} {:>9} {:>10} {:>5}",
        "Pair", "Type", "Liquidity", "Profit", "Risk"
    );
    for op in &ops {
        println!(
            "{:<32} {:<14} {:>7.1}/10 {:>9.2} {:>5}",
            op.pair_label(),
            op.arb_type.to_string(),
            op.liquidity,
            op.potential_profit,
            op.risk_score
        );
    }

    let portfolio = summary::summarize(&ops);
    println!();
    println!(
        "{} opportunities | avg duration {:.2} yrs | avg yield {:.2}% | avg liquidity {:.1}/10",
        portfolio.count, portfolio.avg_duration, portfolio.avg_yield, portfolio.avg_liquidity
    );
    for (arb_type, n) in summary::composition_by_type(&ops) {
        println!("  {arb_type}: {n}");
    }
    Ok(())
}

fn run_backtest_cmd(
    settings: &Settings,
    strategy: Option<String>,
    min_profit: Option<f64>,
    max_risk: Option<u8>,
    count: Option<usize>,
    seed: Option<u64>,
    log: bool,
) -> Result<(), BondPulseError> {
    let count = count.unwrap_or(settings.opportunity_count);
    let seed = seed.or(settings.seed);

    let strategy_name = strategy.unwrap_or_else(|| settings.strategy.clone());
    let strategy = match strategy_name.to_lowercase().as_str() {
        "balanced" => Strategy::Balanced,
        "custom" => Strategy::Custom(StrategyParams {
            min_profit: min_profit.unwrap_or(settings.min_profit),
            max_risk: max_risk.unwrap_or(settings.max_risk),
        }),
        other => {
            return Err(BondPulseError::InvalidStrategyParam {
                name: "strategy".to_string(),
                reason: format!("unknown strategy {other:?}"),
            });
        }
    };

    let ops = make_adapter(seed).opportunities(count)?;
    eprintln!(
        "Backtesting '{}' strategy over {} opportunities",
        strategy.name(),
        ops.len()
    );

    let result = run_backtest(&ops, &strategy, &mut make_rng(seed))?;

    println!("Trades:        {}", result.trades);
    println!("Total return:  {:.2}%", result.total_return_pct);
    println!("Sharpe ratio:  {:.2}", result.sharpe_ratio);
    println!("Max drawdown:  {:.2}%", result.max_drawdown_pct);
    println!("Win/loss:      {}", result.win_loss);
    if let Some(last) = result.equity_curve.last() {
        println!("Final equity:  {:.2}", last.equity);
    }

    if log {
        println!();
        for trade in &result.trade_log {
            println!(
                "{:<32} {:>9.2} {}",
                trade.pair, trade.profit, trade.status
            );
        }
    }
    Ok(())
}

fn run_scenario(
    settings: &Settings,
    name: Option<String>,
    seed: Option<u64>,
) -> Result<(), BondPulseError> {
    let seed = seed.or(settings.seed);
    let scenario = Scenario::parse(&name.unwrap_or_else(|| settings.scenario.clone()));
    let curve = make_adapter(seed).base_yield_curve()?;
    let stressed = apply_scenario(&curve, scenario);

    println!("Scenario: {scenario}");
    println!("{:<8} {:>8} {:>10}", "Tenor", "Base", "Scenario");
    for point in &stressed {
        println!(
            "{:<8} {:>7.2}% {:>9.2}%",
            point.maturity, point.yield_pct, point.scenario_yield
        );
    }
    Ok(())
}

fn run_spread(
    settings: &Settings,
    id: usize,
    days: u32,
    seed: Option<u64>,
) -> Result<(), BondPulseError> {
    let seed = seed.or(settings.seed);
    let ops = make_adapter(seed).opportunities(settings.opportunity_count)?;
    let op = ops
        .iter()
        .find(|op| op.id == id)
        .ok_or_else(|| BondPulseError::InvalidStrategyParam {
            name: "id".to_string(),
            reason: format!("no opportunity with id {id}"),
        })?;

    let history = simulate_spread_history(
        op.leg_a.yield_pct,
        op.leg_b.yield_pct,
        days,
        &mut make_rng(seed),
    );

    println!("Spread history: {}", op.pair_label());
    println!("{:<10} {:>8} {:>6}", "Days ago", "Spread", "Vol");
    for point in &history {
        println!(
            "{:<10} {:>8.2} {:>6.2}",
            point.days_ago, point.spread, point.volatility
        );
    }
    Ok(())
}

fn run_frontier(
    settings: &Settings,
    samples: Option<usize>,
    assets: Option<usize>,
    seed: Option<u64>,
    target: Option<String>,
) -> Result<(), BondPulseError> {
    let samples = samples.unwrap_or(settings.frontier_samples);
    let assets = assets.unwrap_or(settings.frontier_assets);
    let seed = seed.or(settings.seed);

    let ops = make_adapter(seed).opportunities(assets)?;
    let asset_ids: Vec<String> = ops.iter().map(|op| op.leg_a.bond.clone()).collect();

    eprintln!("Sampling {samples} portfolios over {assets} assets");
    let frontier = explore_frontier(&asset_ids, samples, &mut make_rng(seed))?;

    let chosen = match target.as_deref().unwrap_or("max-sharpe") {
        "max-sharpe" => frontier.max_sharpe.as_ref(),
        "min-vol" => frontier.min_volatility.as_ref(),
        other => {
            return Err(BondPulseError::InvalidStrategyParam {
                name: "target".to_string(),
                reason: format!("unknown optimization target {other:?}"),
            });
        }
    };

    if let Some(min_vol) = &frontier.min_volatility {
        println!(
            "Min volatility: vol {:.2}%  return {:.2}%  sharpe {:.2}",
            min_vol.volatility, min_vol.expected_return, min_vol.sharpe
        );
    }
    if let Some(max_sharpe) = &frontier.max_sharpe {
        println!(
            "Max Sharpe:     vol {:.2}%  return {:.2}%  sharpe {:.2}",
            max_sharpe.volatility, max_sharpe.expected_return, max_sharpe.sharpe
        );
    }

    if let Some(portfolio) = chosen {
        println!();
        println!("Optimal weights:");
        for (asset, weight) in asset_ids.iter().zip(&portfolio.weights) {
            println!("  {:<36} {:>5.1}%", asset, weight * 100.0);
        }
    } else {
        println!("No portfolios sampled (no assets)");
    }
    Ok(())
}
