//! Error types for the finite-difference engine.
//!
//! [`ConfigError`] covers invalid engine parameters and mesh requests and is
//! raised before any solve starts. [`PdeError`] is the request-level error of
//! every solver, extractor and Greek entry point.

use std::fmt;

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{InterpolationError, PricingError};
use pricer_models::instruments::InstrumentError;
use thiserror::Error;

use crate::greeks::GreekKind;

/// Configuration error for the PDE engine.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Step count below the minimum of two.
    InvalidStepCount {
        /// Parameter name.
        name: &'static str,
        /// Requested number of steps.
        steps: usize,
    },
    /// Invalid parameter value with name and description.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStepCount { name, steps } => {
                write!(f, "Invalid step count {} for '{}': must be at least 2", steps, name)
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter '{}': {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised while building, solving or reading a PDE grid.
///
/// # Example
/// ```
/// use pricer_pricing::pde::PdeError;
///
/// let err = PdeError::OutOfDomain { x: 400.0, min: 0.0, max: 350.0 };
/// assert!(err.to_string().contains("400"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PdeError {
    /// Invalid engine configuration or mesh request.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Surface or curve lookup failed.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Invalid option contract.
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    /// Reading results between grid nodes failed.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Zero pivot in the tridiagonal elimination.
    #[error("Singular tridiagonal system at row {row}")]
    SingularSystem {
        /// Row of the zero pivot.
        row: usize,
    },

    /// The solution left the finite range.
    #[error("Non-finite solution after time step {step}")]
    NonFinite {
        /// Time step that produced the value.
        step: usize,
    },

    /// Query point outside the grid domain.
    #[error("Point {x} outside grid domain [{min}, {max}]")]
    OutOfDomain {
        /// Requested point.
        x: f64,
        /// Lower end of the domain.
        min: f64,
        /// Upper end of the domain.
        max: f64,
    },

    /// Too few usable nodes to report a Greek.
    #[error("{kind} unavailable at strike {strike}")]
    Unavailable {
        /// Requested Greek.
        kind: GreekKind,
        /// Requested strike.
        strike: f64,
    },
}

impl From<PdeError> for PricingError {
    fn from(err: PdeError) -> Self {
        match err {
            PdeError::SingularSystem { .. } | PdeError::NonFinite { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            PdeError::Unavailable { .. } => PricingError::Unavailable(err.to_string()),
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}
