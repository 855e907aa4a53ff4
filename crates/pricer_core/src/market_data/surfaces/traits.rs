//! Local volatility surface trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;
use std::fmt;

/// Second coordinate of a local volatility surface.
///
/// A surface is either a function of `(t, K)` with `K` an absolute strike, or
/// of `(t, m)` with `m = K / F(t)` the forward moneyness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SurfaceCoordinate {
    /// Absolute strike `K`.
    Strike,
    /// Forward moneyness `K / F(t)`.
    Moneyness,
}

impl fmt::Display for SurfaceCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceCoordinate::Strike => write!(f, "strike"),
            SurfaceCoordinate::Moneyness => write!(f, "moneyness"),
        }
    }
}

/// Local volatility `σ(t, x)` of the underlying.
///
/// # Contract
///
/// - `volatility(t, x)` returns a non-negative, finite volatility for every
///   `t >= 0` and `x >= 0`
/// - `coordinate()` declares whether `x` is a strike or a moneyness
///
/// Implementations are immutable; shifted or converted surfaces are new
/// values wrapping the original.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{
///     FlatLocalVol, LocalVolatilitySurface, SurfaceCoordinate,
/// };
///
/// let surface = FlatLocalVol::strike(0.20_f64).unwrap();
/// assert_eq!(surface.volatility(1.0, 100.0).unwrap(), 0.20);
/// assert_eq!(surface.coordinate(), SurfaceCoordinate::Strike);
/// ```
pub trait LocalVolatilitySurface<T: Float> {
    /// Local volatility at time `t` and coordinate `x`.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InvalidMaturity` - If `t < 0`
    /// * `MarketDataError::InvalidStrike` - If `x < 0`
    fn volatility(&self, t: T, x: T) -> Result<T, MarketDataError>;

    /// Coordinate in which `x` is expressed.
    fn coordinate(&self) -> SurfaceCoordinate;
}

impl<T: Float, S: LocalVolatilitySurface<T> + ?Sized> LocalVolatilitySurface<T> for &S {
    #[inline]
    fn volatility(&self, t: T, x: T) -> Result<T, MarketDataError> {
        (**self).volatility(t, x)
    }

    #[inline]
    fn coordinate(&self) -> SurfaceCoordinate {
        (**self).coordinate()
    }
}

/// Reject negative time or coordinate.
#[inline]
pub(crate) fn check_point<T: Float>(t: T, x: T) -> Result<(), MarketDataError> {
    if t < T::zero() || t.is_nan() {
        return Err(MarketDataError::InvalidMaturity {
            t: t.to_f64().unwrap_or(f64::NAN),
        });
    }
    if x < T::zero() || x.is_nan() {
        return Err(MarketDataError::InvalidStrike {
            strike: x.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}

/// Reject negative or non-finite volatilities.
#[inline]
pub(crate) fn check_volatility<T: Float>(sigma: T) -> Result<T, MarketDataError> {
    if !sigma.is_finite() || sigma < T::zero() {
        return Err(MarketDataError::InvalidVolatility {
            volatility: sigma.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(sigma)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SkewSurface;

    impl LocalVolatilitySurface<f64> for SkewSurface {
        fn volatility(&self, t: f64, x: f64) -> Result<f64, MarketDataError> {
            check_point(t, x)?;
            Ok(0.2 + 0.1 * (1.0 - x))
        }

        fn coordinate(&self) -> SurfaceCoordinate {
            SurfaceCoordinate::Moneyness
        }
    }

    #[test]
    fn test_reference_forwards_to_surface() {
        let surface = SkewSurface;
        let by_ref = &surface;
        assert_eq!(by_ref.volatility(1.0, 0.5).unwrap(), 0.25);
        assert_eq!(by_ref.coordinate(), SurfaceCoordinate::Moneyness);
    }

    #[test]
    fn test_trait_object() {
        let surface: &dyn LocalVolatilitySurface<f64> = &SkewSurface;
        assert_eq!(surface.volatility(0.0, 1.0).unwrap(), 0.2);
    }

    #[test]
    fn test_check_point() {
        assert!(check_point(0.0, 0.0).is_ok());
        assert!(matches!(
            check_point(-1.0, 1.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
        assert!(matches!(
            check_point(1.0, -1.0),
            Err(MarketDataError::InvalidStrike { .. })
        ));
    }

    #[test]
    fn test_check_volatility() {
        assert_eq!(check_volatility(0.0).unwrap(), 0.0);
        assert!(check_volatility(-0.01).is_err());
        assert!(check_volatility(f64::INFINITY).is_err());
    }

    #[test]
    fn test_coordinate_display() {
        assert_eq!(SurfaceCoordinate::Strike.to_string(), "strike");
        assert_eq!(SurfaceCoordinate::Moneyness.to_string(), "moneyness");
    }
}
