//! Market data error types.
//!
//! Structured errors for forward curve and local volatility surface
//! construction and lookups.

use crate::market_data::surfaces::SurfaceCoordinate;
use crate::types::{InterpolationError, PricingError};
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `InvalidMaturity`: Negative time
/// - `InvalidStrike`: Non-positive strike
/// - `InvalidExpiry`: Non-positive or unsorted expiry pillar
/// - `InvalidForward`: Non-positive or non-finite forward level
/// - `InvalidVolatility`: Negative or non-finite volatility
/// - `InvalidShift`: Fractional shift of `-1` or below
/// - `Coordinate`: Surface parameterised in the wrong coordinate
/// - `OutOfBounds`: Query outside valid domain
/// - `Interpolation`: Wrapped interpolation error
/// - `InsufficientData`: Not enough data points for construction
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity (negative time).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid expiry pillar.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Invalid forward level.
    #[error("Invalid forward: F = {forward}")]
    InvalidForward {
        /// The invalid forward value
        forward: f64,
    },

    /// Invalid volatility level.
    #[error("Invalid volatility: sigma = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid fractional shift.
    #[error("Invalid fractional shift: {shift} (must be greater than -1)")]
    InvalidShift {
        /// The rejected shift
        shift: f64,
    },

    /// Surface declared in an unexpected coordinate.
    #[error("Surface coordinate mismatch: expected {expected}, found {found}")]
    Coordinate {
        /// Coordinate required by the operation
        expected: SurfaceCoordinate,
        /// Coordinate declared by the surface
        found: SurfaceCoordinate,
    },

    /// Query point outside valid domain.
    #[error("Out of bounds: {x} not in [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_maturity_display() {
        let err = MarketDataError::InvalidMaturity { t: -1.5 };
        assert_eq!(format!("{}", err), "Invalid maturity: t = -1.5");
    }

    #[test]
    fn test_invalid_forward_display() {
        let err = MarketDataError::InvalidForward { forward: 0.0 };
        assert_eq!(format!("{}", err), "Invalid forward: F = 0");
    }

    #[test]
    fn test_invalid_shift_display() {
        let err = MarketDataError::InvalidShift { shift: -1.0 };
        assert!(err.to_string().contains("greater than -1"));
    }

    #[test]
    fn test_coordinate_display() {
        let err = MarketDataError::Coordinate {
            expected: SurfaceCoordinate::Strike,
            found: SurfaceCoordinate::Moneyness,
        };
        assert_eq!(
            err.to_string(),
            "Surface coordinate mismatch: expected strike, found moneyness"
        );
    }

    #[test]
    fn test_from_interpolation_error() {
        let interp_err = InterpolationError::OutOfBounds {
            x: 5.0,
            min: 0.0,
            max: 3.0,
        };
        let mkt_err: MarketDataError = interp_err.into();
        match mkt_err {
            MarketDataError::Interpolation(_) => {}
            _ => panic!("Expected Interpolation variant"),
        }
    }

    #[test]
    fn test_into_pricing_error() {
        let mkt_err = MarketDataError::InvalidMaturity { t: -1.0 };
        let pricing_err: PricingError = mkt_err.into();
        match pricing_err {
            PricingError::InvalidInput(msg) => {
                assert!(msg.contains("-1"));
            }
            _ => panic!("Expected InvalidInput variant"),
        }
    }
}
