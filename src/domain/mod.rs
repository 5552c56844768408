//! Core domain types and engines.

pub mod opportunity;
pub mod yield_curve;
pub mod backtest;
pub mod metrics;
pub mod frontier;
pub mod spread;
pub mod summary;
pub mod error;
