//! INI settings adapter.
//!
//! Loads an optional profile that supplies defaults for the CLI. Missing
//! keys fall back to the built-in defaults; present-but-malformed values
//! are rejected rather than silently defaulted.
//!
//! ```ini
//! [backtest]
//! strategy = custom
//! min_profit = 15
//! max_risk = 75
//!
//! [frontier]
//! samples = 1000
//! assets = 10
//!
//! [market]
//! opportunities = 100
//! seed = 42
//! scenario = Steepener
//! ```

use configparser::ini::Ini;
use std::path::Path;

use crate::domain::error::BondPulseError;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// "balanced" or "custom".
    pub strategy: String,
    pub min_profit: f64,
    pub max_risk: u8,
    pub frontier_samples: usize,
    pub frontier_assets: usize,
    pub opportunity_count: usize,
    pub scenario: String,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            strategy: "balanced".to_string(),
            min_profit: 20.0,
            max_risk: 70,
            frontier_samples: 1000,
            frontier_assets: 10,
            opportunity_count: 100,
            scenario: "None".to_string(),
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BondPulseError> {
        let label = path.as_ref().display().to_string();
        let mut ini = Ini::new();
        ini.load(&path).map_err(|reason| BondPulseError::ConfigParse {
            file: label.clone(),
            reason,
        })?;
        Self::from_ini(&ini)
    }

    pub fn from_string(content: &str) -> Result<Self, BondPulseError> {
        let mut ini = Ini::new();
        ini.read(content.to_string())
            .map_err(|reason| BondPulseError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, BondPulseError> {
        let defaults = Settings::default();

        let settings = Settings {
            strategy: ini
                .get("backtest", "strategy")
                .map(|s| s.to_lowercase())
                .unwrap_or(defaults.strategy),
            min_profit: get_f64(ini, "backtest", "min_profit")?.unwrap_or(defaults.min_profit),
            max_risk: get_u64(ini, "backtest", "max_risk")?
                .map(|v| u8::try_from(v).unwrap_or(u8::MAX))
                .unwrap_or(defaults.max_risk),
            frontier_samples: get_u64(ini, "frontier", "samples")?
                .map(|v| v as usize)
                .unwrap_or(defaults.frontier_samples),
            frontier_assets: get_u64(ini, "frontier", "assets")?
                .map(|v| v as usize)
                .unwrap_or(defaults.frontier_assets),
            opportunity_count: get_u64(ini, "market", "opportunities")?
                .map(|v| v as usize)
                .unwrap_or(defaults.opportunity_count),
            scenario: ini
                .get("market", "scenario")
                .unwrap_or(defaults.scenario),
            seed: get_u64(ini, "market", "seed")?,
        };

        match settings.strategy.as_str() {
            "balanced" | "custom" => {}
            other => {
                return Err(BondPulseError::ConfigInvalid {
                    section: "backtest".to_string(),
                    key: "strategy".to_string(),
                    reason: format!("unknown strategy {other:?}"),
                });
            }
        }
        if settings.max_risk > 100 {
            return Err(BondPulseError::ConfigInvalid {
                section: "backtest".to_string(),
                key: "max_risk".to_string(),
                reason: "must be at most 100".to_string(),
            });
        }

        Ok(settings)
    }
}

fn get_f64(ini: &Ini, section: &str, key: &str) -> Result<Option<f64>, BondPulseError> {
    match ini.get(section, key) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| invalid(section, key, &raw)),
    }
}

fn get_u64(ini: &Ini, section: &str, key: &str) -> Result<Option<u64>, BondPulseError> {
    match ini.get(section, key) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| invalid(section, key, &raw)),
    }
}

fn invalid(section: &str, key: &str, raw: &str) -> BondPulseError {
    BondPulseError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("cannot parse {raw:?} as a number"),
    }
}
