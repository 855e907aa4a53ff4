//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Top-level errors surfaced to callers of the pricing stack
//! - `InterpolationError`: Errors from interpolation operations
//! - `SolverError`: Errors from root-finding solvers

use std::fmt;
use thiserror::Error;

/// Categorised pricing errors.
///
/// Every layer of the workspace converts its own error type into a
/// `PricingError` so that an outer orchestration layer only has to handle one
/// type.
///
/// # Variants
/// - `InvalidInput`: Invalid market data, option or configuration
/// - `NumericalInstability`: A numerical routine broke down (singular system, non-finite values)
/// - `ModelFailure`: Model assumptions violated
/// - `Unavailable`: A requested quantity could not be produced for these inputs
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative strike".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative strike");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Numerical instability during computation
    NumericalInstability(String),

    /// Model failed to produce valid result
    ModelFailure(String),

    /// Result not available for the given inputs
    Unavailable(String),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::NumericalInstability(msg) => {
                write!(f, "Numerical instability: {}", msg)
            }
            PricingError::ModelFailure(msg) => write!(f, "Model failure: {}", msg),
            PricingError::Unavailable(msg) => write!(f, "Unavailable: {}", msg),
        }
    }
}

impl std::error::Error for PricingError {}

/// Interpolation errors.
///
/// # Variants
/// - `OutOfBounds`: Query point outside valid interpolation domain
/// - `InsufficientData`: Not enough data points for interpolation
/// - `NonMonotonicData`: Abscissae are not strictly increasing
/// - `InvalidInput`: General invalid input error
///
/// # Examples
/// ```
/// use pricer_core::types::InterpolationError;
///
/// let err = InterpolationError::OutOfBounds { x: 5.0, min: 0.0, max: 3.0 };
/// assert!(format!("{}", err).contains("outside valid domain"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data points for interpolation.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Abscissae are not strictly increasing.
    #[error("Data is not monotonic at index {index}")]
    NonMonotonicData {
        /// Index where monotonicity violation was detected
        index: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `NumericalInstability`: General numerical instability
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl From<InterpolationError> for PricingError {
    fn from(err: InterpolationError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        PricingError::NumericalInstability(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // PricingError
    // ========================================

    #[test]
    fn test_pricing_error_display() {
        assert_eq!(
            PricingError::InvalidInput("bad".to_string()).to_string(),
            "Invalid input: bad"
        );
        assert_eq!(
            PricingError::NumericalInstability("singular".to_string()).to_string(),
            "Numerical instability: singular"
        );
        assert_eq!(
            PricingError::ModelFailure("negative density".to_string()).to_string(),
            "Model failure: negative density"
        );
        assert_eq!(
            PricingError::Unavailable("implied vol".to_string()).to_string(),
            "Unavailable: implied vol"
        );
    }

    #[test]
    fn test_pricing_error_is_std_error() {
        let err = PricingError::ModelFailure("x".to_string());
        let _: &dyn std::error::Error = &err;
    }

    // ========================================
    // InterpolationError / SolverError
    // ========================================

    #[test]
    fn test_interpolation_error_display() {
        let err = InterpolationError::InsufficientData { got: 1, need: 2 };
        assert_eq!(
            err.to_string(),
            "Insufficient data points: got 1, need at least 2"
        );

        let err = InterpolationError::NonMonotonicData { index: 3 };
        assert_eq!(err.to_string(), "Data is not monotonic at index 3");
    }

    #[test]
    fn test_solver_error_display() {
        let err = SolverError::NoBracket { a: 0.0, b: 1.0 };
        assert_eq!(err.to_string(), "No bracket: f(0) and f(1) have same sign");
    }

    #[test]
    fn test_solver_error_into_pricing_error() {
        let err: PricingError = SolverError::MaxIterationsExceeded { iterations: 7 }.into();
        match err {
            PricingError::NumericalInstability(msg) => assert!(msg.contains("7 iterations")),
            _ => panic!("Expected NumericalInstability variant"),
        }
    }

    #[test]
    fn test_interpolation_error_into_pricing_error() {
        let err: PricingError = InterpolationError::InvalidInput("nan".to_string()).into();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }
}
