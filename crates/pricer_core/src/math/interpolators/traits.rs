//! Interpolator trait definition.

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolator over a fixed, sorted data set.
///
/// Implementations are immutable once constructed and are `Send + Sync`
/// whenever `T` is, so a single interpolator can serve many threads.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(&[0.0_f64, 1.0, 2.0], &[0.0, 2.0, 4.0]).unwrap();
/// assert!(interp.contains(1.5));
/// assert!(!interp.contains(2.5));
/// assert!((interp.interpolate(1.5).unwrap() - 3.0).abs() < 1e-12);
/// ```
pub trait Interpolator<T: Float> {
    /// Interpolate the value at `x`.
    ///
    /// # Errors
    ///
    /// `InterpolationError::OutOfBounds` when `x` lies outside [`domain`](Interpolator::domain).
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Return the closed interval `(x_min, x_max)` on which interpolation is defined.
    fn domain(&self) -> (T, T);

    /// Whether `x` lies inside the interpolation domain.
    #[inline]
    fn contains(&self, x: T) -> bool {
        let (lo, hi) = self.domain();
        x >= lo && x <= hi
    }
}
