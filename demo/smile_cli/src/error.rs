//! Error types for the smile demo.

use pricer_core::market_data::MarketDataError;
use pricer_models::instruments::InstrumentError;
use pricer_pricing::pde::PdeError;
use thiserror::Error;

/// Smile demo error type
#[derive(Debug, Error)]
pub enum SmileError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Market construction error
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Option construction error
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    /// Solver or Greek error
    #[error("Pricing error: {0}")]
    Pricing(#[from] PdeError),

    /// Report serialisation error
    #[error("Output error: {0}")]
    Output(String),
}

/// Result alias for the smile demo
pub type Result<T> = std::result::Result<T, SmileError>;
