//! Closure-backed local volatility surface.

use super::traits::{check_point, check_volatility};
use super::{LocalVolatilitySurface, SurfaceCoordinate};
use crate::market_data::error::MarketDataError;
use num_traits::Float;
use std::fmt;
use std::marker::PhantomData;

/// Local volatility given by a function `σ(t, x)`.
///
/// Used for parametric surfaces (SVI-style slices, tanh skews) that are
/// cheaper to evaluate directly than to tabulate. The function must be pure;
/// a negative or non-finite output is reported as
/// `MarketDataError::InvalidVolatility` at lookup time.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{
///     FunctionalLocalVol, LocalVolatilitySurface, SurfaceCoordinate,
/// };
///
/// let skew = FunctionalLocalVol::new(
///     |_t: f64, k: f64| 0.2 - 0.1 * (k / 100.0 - 1.0),
///     SurfaceCoordinate::Strike,
/// );
/// assert!((skew.volatility(1.0, 90.0).unwrap() - 0.21).abs() < 1e-12);
/// ```
#[derive(Clone)]
pub struct FunctionalLocalVol<T, F> {
    function: F,
    coordinate: SurfaceCoordinate,
    _marker: PhantomData<fn(T, T) -> T>,
}

impl<T, F> FunctionalLocalVol<T, F>
where
    T: Float,
    F: Fn(T, T) -> T,
{
    /// Wrap `function` as a surface in the given coordinate.
    pub fn new(function: F, coordinate: SurfaceCoordinate) -> Self {
        Self {
            function,
            coordinate,
            _marker: PhantomData,
        }
    }
}

impl<T, F> fmt::Debug for FunctionalLocalVol<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionalLocalVol")
            .field("coordinate", &self.coordinate)
            .finish_non_exhaustive()
    }
}

impl<T, F> LocalVolatilitySurface<T> for FunctionalLocalVol<T, F>
where
    T: Float,
    F: Fn(T, T) -> T,
{
    fn volatility(&self, t: T, x: T) -> Result<T, MarketDataError> {
        check_point(t, x)?;
        check_volatility((self.function)(t, x))
    }

    #[inline]
    fn coordinate(&self) -> SurfaceCoordinate {
        self.coordinate
    }
}
