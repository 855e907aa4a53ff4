//! Forward curve trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Forward price curve `F(t)` of the underlying.
///
/// # Contract
///
/// - `forward(t)` is pure and total on `t >= 0`
/// - `forward(t) > 0` for every valid `t`
/// - negative `t` fails with `MarketDataError::InvalidMaturity`
///
/// Bump-and-revise Greeks never mutate a curve; they ask for a new one through
/// [`with_fractional_shift`](ForwardCurve::with_fractional_shift).
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{ForwardCurve, FlatForwardCurve};
///
/// let curve = FlatForwardCurve::new(100.0_f64).unwrap();
/// let up = curve.with_fractional_shift(0.01).unwrap();
///
/// assert!((up.forward(1.0).unwrap() - 101.0).abs() < 1e-12);
/// assert_eq!(curve.forward(1.0).unwrap(), 100.0);
/// ```
pub trait ForwardCurve<T: Float> {
    /// Forward price for delivery at time `t`.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InvalidMaturity` - If `t < 0`
    fn forward(&self, t: T) -> Result<T, MarketDataError>;

    /// A new curve equal to `F(t)·(1 + shift)` for every `t`.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InvalidShift` - If `shift <= -1` or not finite
    fn with_fractional_shift(&self, shift: T) -> Result<Self, MarketDataError>
    where
        Self: Sized;
}

/// Reject negative times.
#[inline]
pub(crate) fn check_time<T: Float>(t: T) -> Result<(), MarketDataError> {
    if t < T::zero() || t.is_nan() {
        return Err(MarketDataError::InvalidMaturity {
            t: t.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}

/// Validate a fractional shift and return the multiplier `1 + shift`.
#[inline]
pub(crate) fn shift_factor<T: Float>(shift: T) -> Result<T, MarketDataError> {
    if !shift.is_finite() || shift <= -T::one() {
        return Err(MarketDataError::InvalidShift {
            shift: shift.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(T::one() + shift)
}

/// Validate a forward level.
#[inline]
pub(crate) fn check_forward<T: Float>(forward: T) -> Result<(), MarketDataError> {
    if !forward.is_finite() || forward <= T::zero() {
        return Err(MarketDataError::InvalidForward {
            forward: forward.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_time() {
        assert!(check_time(0.0).is_ok());
        assert!(check_time(2.5).is_ok());
        match check_time(-0.1).unwrap_err() {
            MarketDataError::InvalidMaturity { t } => assert_eq!(t, -0.1),
            _ => panic!("Expected InvalidMaturity error"),
        }
        assert!(check_time(f64::NAN).is_err());
    }

    #[test]
    fn test_shift_factor() {
        assert_eq!(shift_factor(0.01).unwrap(), 1.01);
        assert_eq!(shift_factor(-0.5).unwrap(), 0.5);
        assert!(matches!(
            shift_factor(-1.0),
            Err(MarketDataError::InvalidShift { .. })
        ));
        assert!(shift_factor(f64::INFINITY).is_err());
    }

    #[test]
    fn test_check_forward() {
        assert!(check_forward(100.0).is_ok());
        assert!(check_forward(0.0).is_err());
        assert!(check_forward(f64::NAN).is_err());
    }
}
