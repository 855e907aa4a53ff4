//! Flat local volatility surface.

use super::traits::{check_point, check_volatility};
use super::{LocalVolatilitySurface, SurfaceCoordinate};
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Local volatility constant in time and space.
///
/// The local volatility model then collapses to Black's model, which makes
/// this surface the natural anchor for testing the PDE engine.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{FlatLocalVol, LocalVolatilitySurface};
///
/// let surface = FlatLocalVol::strike(0.20_f64).unwrap();
/// assert_eq!(surface.volatility(0.5, 80.0).unwrap(), 0.20);
/// assert_eq!(surface.volatility(2.0, 120.0).unwrap(), 0.20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatLocalVol<T: Float> {
    sigma: T,
    coordinate: SurfaceCoordinate,
}

impl<T: Float> FlatLocalVol<T> {
    /// Construct a flat surface in the given coordinate.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InvalidVolatility` - If `sigma < 0` or not finite
    pub fn new(sigma: T, coordinate: SurfaceCoordinate) -> Result<Self, MarketDataError> {
        check_volatility(sigma)?;
        Ok(Self { sigma, coordinate })
    }

    /// Flat surface declared in strike coordinates.
    pub fn strike(sigma: T) -> Result<Self, MarketDataError> {
        Self::new(sigma, SurfaceCoordinate::Strike)
    }

    /// Flat surface declared in moneyness coordinates.
    pub fn moneyness(sigma: T) -> Result<Self, MarketDataError> {
        Self::new(sigma, SurfaceCoordinate::Moneyness)
    }

    /// The constant volatility.
    #[inline]
    pub fn sigma(&self) -> T {
        self.sigma
    }
}

impl<T: Float> LocalVolatilitySurface<T> for FlatLocalVol<T> {
    #[inline]
    fn volatility(&self, t: T, x: T) -> Result<T, MarketDataError> {
        check_point(t, x)?;
        Ok(self.sigma)
    }

    #[inline]
    fn coordinate(&self) -> SurfaceCoordinate {
        self.coordinate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_coordinate() {
        assert_eq!(
            FlatLocalVol::strike(0.2).unwrap().coordinate(),
            SurfaceCoordinate::Strike
        );
        assert_eq!(
            FlatLocalVol::moneyness(0.2).unwrap().coordinate(),
            SurfaceCoordinate::Moneyness
        );
    }

    #[test]
    fn test_zero_volatility_is_allowed() {
        let surface = FlatLocalVol::strike(0.0).unwrap();
        assert_eq!(surface.volatility(1.0, 100.0).unwrap(), 0.0);
    }

    #[test]
    fn test_rejects_negative_volatility() {
        match FlatLocalVol::strike(-0.1).unwrap_err() {
            MarketDataError::InvalidVolatility { volatility } => assert_eq!(volatility, -0.1),
            _ => panic!("Expected InvalidVolatility error"),
        }
    }

    #[test]
    fn test_rejects_negative_time() {
        let surface = FlatLocalVol::strike(0.2).unwrap();
        assert!(matches!(
            surface.volatility(-0.5, 100.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }
}
