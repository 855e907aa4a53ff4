//! Flat and constant-drift forward curves.

use super::traits::{check_forward, check_time, shift_factor};
use super::ForwardCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Forward curve with the same level for every delivery time.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{ForwardCurve, FlatForwardCurve};
///
/// let curve = FlatForwardCurve::new(100.0_f64).unwrap();
/// assert_eq!(curve.forward(0.0).unwrap(), 100.0);
/// assert_eq!(curve.forward(10.0).unwrap(), 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatForwardCurve<T: Float> {
    level: T,
}

impl<T: Float> FlatForwardCurve<T> {
    /// Construct a flat curve.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InvalidForward` - If `level <= 0` or not finite
    pub fn new(level: T) -> Result<Self, MarketDataError> {
        check_forward(level)?;
        Ok(Self { level })
    }

    /// The constant forward level.
    #[inline]
    pub fn level(&self) -> T {
        self.level
    }
}

impl<T: Float> ForwardCurve<T> for FlatForwardCurve<T> {
    #[inline]
    fn forward(&self, t: T) -> Result<T, MarketDataError> {
        check_time(t)?;
        Ok(self.level)
    }

    fn with_fractional_shift(&self, shift: T) -> Result<Self, MarketDataError> {
        Self::new(self.level * shift_factor(shift)?)
    }
}

/// Forward curve growing at a constant continuously compounded drift.
///
/// ```text
/// F(t) = S * exp(mu * t)
/// ```
///
/// With `mu = r - q` this is the usual equity forward under flat rates and
/// dividend yield.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{ForwardCurve, DriftForwardCurve};
///
/// let curve = DriftForwardCurve::new(100.0_f64, 0.05).unwrap();
/// let f2 = curve.forward(2.0).unwrap();
/// assert!((f2 - 100.0 * (0.1_f64).exp()).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriftForwardCurve<T: Float> {
    spot: T,
    drift: T,
}

impl<T: Float> DriftForwardCurve<T> {
    /// Construct a drifting curve from spot and drift.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InvalidForward` - If `spot <= 0` or the drift is not finite
    pub fn new(spot: T, drift: T) -> Result<Self, MarketDataError> {
        check_forward(spot)?;
        if !drift.is_finite() {
            return Err(MarketDataError::InvalidForward {
                forward: drift.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self { spot, drift })
    }

    /// Forward at `t = 0`.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Continuously compounded drift.
    #[inline]
    pub fn drift(&self) -> T {
        self.drift
    }
}

impl<T: Float> ForwardCurve<T> for DriftForwardCurve<T> {
    #[inline]
    fn forward(&self, t: T) -> Result<T, MarketDataError> {
        check_time(t)?;
        Ok(self.spot * (self.drift * t).exp())
    }

    fn with_fractional_shift(&self, shift: T) -> Result<Self, MarketDataError> {
        Self::new(self.spot * shift_factor(shift)?, self.drift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ========================================
    // FlatForwardCurve
    // ========================================

    #[test]
    fn test_flat_rejects_non_positive_level() {
        match FlatForwardCurve::new(0.0).unwrap_err() {
            MarketDataError::InvalidForward { forward } => assert_eq!(forward, 0.0),
            _ => panic!("Expected InvalidForward error"),
        }
        assert!(FlatForwardCurve::new(-5.0).is_err());
    }

    #[test]
    fn test_flat_negative_time() {
        let curve = FlatForwardCurve::new(100.0).unwrap();
        assert!(matches!(
            curve.forward(-1.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }

    #[test]
    fn test_flat_shift_is_new_curve() {
        let curve = FlatForwardCurve::new(100.0).unwrap();
        let down = curve.with_fractional_shift(-0.01).unwrap();
        assert_relative_eq!(down.forward(3.0).unwrap(), 99.0, epsilon = 1e-12);
        assert_eq!(curve.level(), 100.0);
    }

    #[test]
    fn test_flat_shift_rejects_minus_one() {
        let curve = FlatForwardCurve::new(100.0).unwrap();
        assert!(matches!(
            curve.with_fractional_shift(-1.0),
            Err(MarketDataError::InvalidShift { .. })
        ));
    }

    // ========================================
    // DriftForwardCurve
    // ========================================

    #[test]
    fn test_drift_at_zero_is_spot() {
        let curve = DriftForwardCurve::new(50.0, 0.1).unwrap();
        assert_eq!(curve.forward(0.0).unwrap(), 50.0);
        assert_eq!(curve.spot(), 50.0);
        assert_eq!(curve.drift(), 0.1);
    }

    #[test]
    fn test_drift_shift_scales_every_time() {
        let curve = DriftForwardCurve::new(100.0, -0.02).unwrap();
        let up = curve.with_fractional_shift(0.01).unwrap();
        for &t in &[0.0, 0.5, 1.0, 5.0] {
            assert_relative_eq!(
                up.forward(t).unwrap(),
                1.01 * curve.forward(t).unwrap(),
                max_relative = 1e-14
            );
        }
    }

    #[test]
    fn test_drift_rejects_nan_drift() {
        assert!(DriftForwardCurve::new(100.0, f64::NAN).is_err());
    }
}
