//! Linear interpolation implementation.

use super::{check_strictly_increasing, lower_segment, Interpolator};
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator.
///
/// Stores strictly increasing `(x, y)` pillars and interpolates linearly
/// between adjacent pillars. [`interpolate_flat`](LinearInterpolator::interpolate_flat)
/// additionally extends the end values flat beyond the pillar range, which is
/// how term-structure curves are extrapolated.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let xs = [0.0, 1.0, 2.0, 3.0];
/// let ys = [0.0, 2.0, 4.0, 6.0];
///
/// let interp = LinearInterpolator::new(&xs, &ys).unwrap();
/// assert_eq!(interp.domain(), (0.0, 3.0));
/// assert_eq!(interp.interpolate_flat(10.0), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Construct a linear interpolator from pillar data.
    ///
    /// # Arguments
    ///
    /// * `xs` - Strictly increasing abscissae (at least 2)
    /// * `ys` - Values at each abscissa
    ///
    /// # Errors
    ///
    /// * `InterpolationError::InvalidInput` - Mismatched lengths or non-finite values
    /// * `InterpolationError::InsufficientData` - Fewer than 2 points
    /// * `InterpolationError::NonMonotonicData` - `xs` not strictly increasing
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::interpolators::LinearInterpolator;
    ///
    /// assert!(LinearInterpolator::new(&[0.0, 1.0], &[0.0, 1.0]).is_ok());
    /// assert!(LinearInterpolator::new(&[1.0, 0.0], &[0.0, 1.0]).is_err());
    /// ```
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }
        check_strictly_increasing(xs, 2)?;
        if let Some(i) = ys.iter().position(|y| !y.is_finite()) {
            return Err(InterpolationError::InvalidInput(format!(
                "non-finite value at index {}",
                i
            )));
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Pillar abscissae.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Pillar values.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Number of pillars.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for a constructed interpolator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Interpolate inside the pillar range and hold the end values outside it.
    pub fn interpolate_flat(&self, x: T) -> T {
        let n = self.xs.len();
        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[n - 1] {
            return self.ys[n - 1];
        }
        self.segment_value(x)
    }

    /// Apply `f` to every pillar value, keeping the abscissae.
    pub fn map_values<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T,
    {
        Self {
            xs: self.xs.clone(),
            ys: self.ys.iter().map(|&y| f(y)).collect(),
        }
    }

    #[inline]
    fn segment_value(&self, x: T) -> T {
        let i = lower_segment(&self.xs, x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    /// Interpolate value at point `x`.
    ///
    /// ```text
    /// y = y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    /// ```
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if x < x_min || x > x_max {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: x_min.to_f64().unwrap_or(f64::NAN),
                max: x_max.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.segment_value(x))
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
