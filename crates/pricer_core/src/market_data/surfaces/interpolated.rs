//! Grid-based local volatility surface.

use super::traits::{check_point, check_volatility};
use super::{LocalVolatilitySurface, SurfaceCoordinate};
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::BilinearInterpolator;
use num_traits::Float;

/// Local volatility surface interpolated bilinearly on a `time × x` grid.
///
/// Outside the grid the surface is extended flat in both directions, so
/// every non-negative `(t, x)` has a volatility. PDE meshes routinely reach
/// far beyond the quoted range (up to several times the forward) and this
/// keeps the solver well defined there.
///
/// # Grid Layout
///
/// `vols[time_idx][x_idx]`: one row per time pillar.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{
///     GridLocalVol, LocalVolatilitySurface, SurfaceCoordinate,
/// };
///
/// let times = [0.5_f64, 1.0];
/// let moneyness = [0.8, 1.0, 1.2];
/// let vols = [
///     &[0.26, 0.22, 0.20][..],
///     &[0.25, 0.21, 0.19][..],
/// ];
///
/// let surface =
///     GridLocalVol::new(&times, &moneyness, &vols, SurfaceCoordinate::Moneyness).unwrap();
/// assert!((surface.volatility(0.75, 1.0).unwrap() - 0.215).abs() < 1e-12);
/// // Flat beyond the last time pillar and the last moneyness
/// assert!((surface.volatility(3.0, 3.5).unwrap() - 0.19).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridLocalVol<T: Float> {
    grid: BilinearInterpolator<T>,
    coordinate: SurfaceCoordinate,
}

impl<T: Float> GridLocalVol<T> {
    /// Construct a grid surface.
    ///
    /// # Arguments
    ///
    /// * `times` - Strictly increasing, non-negative time pillars (at least 2)
    /// * `xs` - Strictly increasing, non-negative strikes or moneyness values (at least 2)
    /// * `vols` - Volatility grid `vols[time_idx][x_idx]`
    /// * `coordinate` - Declared coordinate of `xs`
    ///
    /// # Errors
    ///
    /// * `MarketDataError::InvalidMaturity` - Negative time pillar
    /// * `MarketDataError::InvalidStrike` - Negative `x` pillar
    /// * `MarketDataError::InvalidVolatility` - Negative or non-finite volatility
    /// * `MarketDataError::Interpolation` - Unsorted axes or ragged grid
    pub fn new(
        times: &[T],
        xs: &[T],
        vols: &[&[T]],
        coordinate: SurfaceCoordinate,
    ) -> Result<Self, MarketDataError> {
        if let (Some(&t0), Some(&x0)) = (times.first(), xs.first()) {
            check_point(t0, x0)?;
        }
        for row in vols {
            for &v in row.iter() {
                check_volatility(v)?;
            }
        }

        Ok(Self {
            grid: BilinearInterpolator::new(times, xs, vols)?,
            coordinate,
        })
    }

    /// Time range covered by the pillars.
    #[inline]
    pub fn time_domain(&self) -> (T, T) {
        self.grid.domain_x()
    }

    /// Strike or moneyness range covered by the pillars.
    #[inline]
    pub fn x_domain(&self) -> (T, T) {
        self.grid.domain_y()
    }
}

impl<T: Float> LocalVolatilitySurface<T> for GridLocalVol<T> {
    fn volatility(&self, t: T, x: T) -> Result<T, MarketDataError> {
        check_point(t, x)?;
        Ok(self.grid.interpolate_clamped(t, x))
    }

    #[inline]
    fn coordinate(&self) -> SurfaceCoordinate {
        self.coordinate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InterpolationError;
    use approx::assert_relative_eq;

    fn surface() -> GridLocalVol<f64> {
        let times = [0.25, 1.0];
        let strikes = [80.0, 100.0, 120.0];
        let vols = [&[0.30, 0.20, 0.25][..], &[0.28, 0.22, 0.24][..]];
        GridLocalVol::new(&times, &strikes, &vols, SurfaceCoordinate::Strike).unwrap()
    }

    #[test]
    fn test_reproduces_pillars() {
        let s = surface();
        assert_relative_eq!(s.volatility(0.25, 80.0).unwrap(), 0.30);
        assert_relative_eq!(s.volatility(1.0, 100.0).unwrap(), 0.22);
    }

    #[test]
    fn test_interpolates_in_strike() {
        assert_relative_eq!(surface().volatility(0.25, 90.0).unwrap(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_extrapolation() {
        let s = surface();
        assert_relative_eq!(s.volatility(0.0, 10.0).unwrap(), 0.30);
        assert_relative_eq!(s.volatility(5.0, 350.0).unwrap(), 0.24);
    }

    #[test]
    fn test_domains() {
        let s = surface();
        assert_eq!(s.time_domain(), (0.25, 1.0));
        assert_eq!(s.x_domain(), (80.0, 120.0));
    }

    #[test]
    fn test_rejects_negative_volatility() {
        let vols = [&[0.2, -0.1][..], &[0.2, 0.2][..]];
        let result = GridLocalVol::new(&[0.0, 1.0], &[1.0, 2.0], &vols, SurfaceCoordinate::Strike);
        assert!(matches!(result, Err(MarketDataError::InvalidVolatility { .. })));
    }

    #[test]
    fn test_rejects_ragged_grid() {
        let vols = [&[0.2, 0.2][..], &[0.2][..]];
        let result = GridLocalVol::new(&[0.0, 1.0], &[1.0, 2.0], &vols, SurfaceCoordinate::Strike);
        match result.unwrap_err() {
            MarketDataError::Interpolation(InterpolationError::InvalidInput(_)) => {}
            other => panic!("Expected interpolation error, got {:?}", other),
        }
    }
}
