//! Parallel-shifted local volatility surface.

use super::{LocalVolatilitySurface, SurfaceCoordinate};
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// A surface shifted by a constant volatility amount.
///
/// ```text
/// sigma'(t, x) = max(sigma(t, x) + shift, 0)
/// ```
///
/// Model vega, vanna and vomma revalue under these shifts. The base surface
/// is wrapped, never modified; pass `&surface` to shift without moving it.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{
///     FlatLocalVol, LocalVolatilitySurface, ShiftedLocalVol,
/// };
///
/// let base = FlatLocalVol::strike(0.20_f64).unwrap();
/// let up = ShiftedLocalVol::new(&base, 0.01);
/// assert!((up.volatility(1.0, 100.0).unwrap() - 0.21).abs() < 1e-15);
/// assert_eq!(base.sigma(), 0.20);
/// ```
#[derive(Debug, Clone)]
pub struct ShiftedLocalVol<T: Float, S> {
    base: S,
    shift: T,
}

impl<T: Float, S: LocalVolatilitySurface<T>> ShiftedLocalVol<T, S> {
    /// Shift `base` by `shift` volatility points.
    pub fn new(base: S, shift: T) -> Self {
        Self { base, shift }
    }

    /// Applied shift.
    #[inline]
    pub fn shift(&self) -> T {
        self.shift
    }

    /// Wrapped surface.
    #[inline]
    pub fn base(&self) -> &S {
        &self.base
    }
}

impl<T: Float, S: LocalVolatilitySurface<T>> LocalVolatilitySurface<T> for ShiftedLocalVol<T, S> {
    #[inline]
    fn volatility(&self, t: T, x: T) -> Result<T, MarketDataError> {
        Ok((self.base.volatility(t, x)? + self.shift).max(T::zero()))
    }

    #[inline]
    fn coordinate(&self) -> SurfaceCoordinate {
        self.base.coordinate()
    }
}
