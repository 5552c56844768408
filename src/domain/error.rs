//! Domain error types.
//!
//! The engines are total over well-typed inputs: zero denominators, empty
//! collections and degenerate weight draws all resolve to documented
//! fallback values. Errors exist only for the fail-fast call boundary
//! (bad strategy parameters, zero sample counts, unreadable config).

/// Top-level error type for bondpulse.
#[derive(Debug, thiserror::Error)]
pub enum BondPulseError {
    #[error("invalid strategy parameter {name}: {reason}")]
    InvalidStrategyParam { name: String, reason: String },

    #[error("sample count must be at least 1")]
    ZeroSampleCount,

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&BondPulseError> for std::process::ExitCode {
    fn from(err: &BondPulseError) -> Self {
        let code: u8 = match err {
            BondPulseError::Io(_) => 1,
            BondPulseError::ConfigParse { .. } | BondPulseError::ConfigInvalid { .. } => 2,
            BondPulseError::InvalidStrategyParam { .. } => 3,
            BondPulseError::ZeroSampleCount => 4,
        };
        std::process::ExitCode::from(code)
    }
}
