//! Instrument error types.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument construction errors.
///
/// # Variants
/// - `InvalidStrike`: Strike is non-positive or not finite
/// - `InvalidExpiry`: Expiry is negative or not finite
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid expiry time (negative).
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_expiry_display() {
        let err = InstrumentError::InvalidExpiry { expiry: -0.5 };
        assert_eq!(format!("{}", err), "Invalid expiry: T = -0.5");
    }

    #[test]
    fn test_from_instrument_error_to_pricing_error() {
        let pricing_err: PricingError = InstrumentError::InvalidStrike { strike: -100.0 }.into();
        match pricing_err {
            PricingError::InvalidInput(msg) => assert!(msg.contains("-100")),
            _ => panic!("Expected InvalidInput variant"),
        }
    }
}
