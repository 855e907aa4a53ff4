//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors from the Black formulas and implied volatility inversion

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidForward`: Non-positive forward
/// - `InvalidStrike`: Non-positive strike
/// - `InvalidExpiry`: Non-positive expiry
/// - `InvalidVolatility`: Negative volatility
/// - `ImpliedVolatility`: Price cannot be inverted to a Black volatility
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid forward (non-positive).
    #[error("Invalid forward: F = {forward}")]
    InvalidForward {
        /// The invalid forward value
        forward: f64,
    },

    /// Invalid strike (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid expiry (non-positive).
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Invalid volatility (negative).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Implied volatility inversion failed.
    #[error("Implied volatility unavailable: {reason}")]
    ImpliedVolatility {
        /// Why the price could not be inverted
        reason: String,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::ImpliedVolatility { .. } => PricingError::Unavailable(err.to_string()),
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_volatility_display() {
        let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(format!("{}", err), "Invalid volatility: σ = -0.2");
    }

    #[test]
    fn test_implied_volatility_display() {
        let err = AnalyticalError::ImpliedVolatility {
            reason: "price below intrinsic".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Implied volatility unavailable: price below intrinsic"
        );
    }

    #[test]
    fn test_implied_volatility_to_pricing_error() {
        let err = AnalyticalError::ImpliedVolatility {
            reason: "no bracket".to_string(),
        };
        match PricingError::from(err) {
            PricingError::Unavailable(msg) => assert!(msg.contains("no bracket")),
            _ => panic!("Expected Unavailable variant"),
        }
    }

    #[test]
    fn test_invalid_inputs_to_pricing_error() {
        for err in [
            AnalyticalError::InvalidForward { forward: 0.0 },
            AnalyticalError::InvalidStrike { strike: -1.0 },
            AnalyticalError::InvalidExpiry { expiry: 0.0 },
        ] {
            assert!(matches!(PricingError::from(err), PricingError::InvalidInput(_)));
        }
    }
}
