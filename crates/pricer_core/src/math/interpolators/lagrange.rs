//! Local Lagrange interpolation through the nearest nodes.

use super::{check_strictly_increasing, lower_segment, Interpolator};
use crate::types::InterpolationError;
use num_traits::Float;

/// Default number of nodes used by [`NearestPointInterpolator::four_point`].
pub const DEFAULT_WINDOW: usize = 4;

/// Lagrange polynomial through the `window` nodes nearest to the query point.
///
/// For a query `x` in segment `[x_j, x_{j+1}]` the window is centred on that
/// segment (`x_{j-1}, x_j, x_{j+1}, x_{j+2}` for a window of four) and shifted
/// inwards near either end so it always contains `window` nodes. When fewer
/// nodes than `window` exist, all of them are used.
///
/// A window of four reproduces cubics exactly and gives a C0 piecewise cubic,
/// which is accurate enough to read prices and Greeks between PDE grid nodes.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, NearestPointInterpolator};
///
/// let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
/// let ys: Vec<f64> = xs.iter().map(|x| x * x * x).collect();
///
/// let interp = NearestPointInterpolator::four_point(&xs, &ys).unwrap();
/// assert!((interp.interpolate(2.5).unwrap() - 15.625).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NearestPointInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
    window: usize,
}

impl<T: Float> NearestPointInterpolator<T> {
    /// Construct an interpolator using `window` nearest nodes.
    ///
    /// # Errors
    ///
    /// * `InterpolationError::InvalidInput` - `window < 2`, mismatched lengths or non-finite values
    /// * `InterpolationError::InsufficientData` - Fewer than 2 nodes
    /// * `InterpolationError::NonMonotonicData` - Unsorted abscissae
    pub fn new(xs: &[T], ys: &[T], window: usize) -> Result<Self, InterpolationError> {
        if window < 2 {
            return Err(InterpolationError::InvalidInput(format!(
                "window must be at least 2, got {}",
                window
            )));
        }
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
            window: window.min(xs.len()),
        })
    }

    /// Construct the four-point interpolator.
    pub fn four_point(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        Self::new(xs, ys, DEFAULT_WINDOW)
    }

    /// Effective number of nodes per evaluation.
    #[inline]
    pub fn window(&self) -> usize {
        self.window
    }

    /// First index of the node window used for `x`.
    fn window_start(&self, x: T) -> usize {
        let j = lower_segment(&self.xs, x);
        let back = (self.window - 1) / 2;
        let last_start = self.xs.len() - self.window;
        j.saturating_sub(back).min(last_start)
    }
}

impl<T: Float> Interpolator<T> for NearestPointInterpolator<T> {
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if x < x_min || x > x_max {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: x_min.to_f64().unwrap_or(f64::NAN),
                max: x_max.to_f64().unwrap_or(f64::NAN),
            });
        }

        let start = self.window_start(x);
        let nodes = &self.xs[start..start + self.window];
        let values = &self.ys[start..start + self.window];

        // Exact hit avoids 0/0 in the basis polynomials
        if let Some(k) = nodes.iter().position(|&xk| xk == x) {
            return Ok(values[k]);
        }

        let mut sum = T::zero();
        for (k, (&xk, &yk)) in nodes.iter().zip(values).enumerate() {
            let mut basis = T::one();
            for (l, &xl) in nodes.iter().enumerate() {
                if l != k {
                    basis = basis * (x - xl) / (xk - xl);
                }
            }
            sum = sum + basis * yk;
        }
        Ok(sum)
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_rejects_small_window() {
        let result = NearestPointInterpolator::new(&[0.0, 1.0], &[0.0, 1.0], 1);
        assert!(matches!(result, Err(InterpolationError::InvalidInput(_))));
    }

    #[test]
    fn test_window_shrinks_to_available_nodes() {
        let interp = NearestPointInterpolator::four_point(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
        assert_eq!(interp.window(), 3);
        // Quadratic through three nodes reproduces x^2
        assert_relative_eq!(interp.interpolate(1.5).unwrap(), 2.25, epsilon = 1e-12);
    }

    #[test]
    fn test_two_nodes_is_linear() {
        let interp = NearestPointInterpolator::four_point(&[0.0, 2.0], &[1.0, 5.0]).unwrap();
        assert_relative_eq!(interp.interpolate(0.5).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_window_start_near_edges() {
        let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let ys = xs.clone();
        let interp = NearestPointInterpolator::four_point(&xs, &ys).unwrap();
        assert_eq!(interp.window_start(0.5), 0);
        assert_eq!(interp.window_start(4.5), 3);
        assert_eq!(interp.window_start(8.5), 6);
        assert_eq!(interp.window_start(9.0), 6);
    }

    #[test]
    fn test_exact_at_nodes() {
        let xs = [0.0, 0.5, 1.5, 3.0, 4.0];
        let ys = [1.0, -2.0, 0.3, 7.0, 2.0];
        let interp = NearestPointInterpolator::four_point(&xs, &ys).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_eq!(interp.interpolate(*x).unwrap(), *y);
        }
    }

    #[test]
    fn test_out_of_bounds() {
        let interp = NearestPointInterpolator::four_point(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert!(matches!(
            interp.interpolate(-0.1),
            Err(InterpolationError::OutOfBounds { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_reproduces_cubics_on_uneven_nodes(
            a in -2.0f64..2.0,
            b in -2.0f64..2.0,
            c in -2.0f64..2.0,
            d in -2.0f64..2.0,
            steps in proptest::collection::vec(0.1f64..1.0, 4..12),
            frac in 0.0f64..1.0,
        ) {
            let mut xs = vec![0.0];
            for s in &steps {
                let last = *xs.last().unwrap();
                xs.push(last + s);
            }
            let cubic = |x: f64| ((a * x + b) * x + c) * x + d;
            let ys: Vec<f64> = xs.iter().map(|&x| cubic(x)).collect();
            let interp = NearestPointInterpolator::four_point(&xs, &ys).unwrap();

            let x = xs[0] + frac * (xs[xs.len() - 1] - xs[0]);
            let got = interp.interpolate(x).unwrap();
            prop_assert!((got - cubic(x)).abs() < 1e-8 * (1.0 + cubic(x).abs()));
        }
    }
}
