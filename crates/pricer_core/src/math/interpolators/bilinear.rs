//! Bilinear interpolation on a rectangular grid.

use super::{check_strictly_increasing, lower_segment};
use crate::types::InterpolationError;
use num_traits::Float;

/// Bilinear interpolator over a rectangular grid.
///
/// Grid values are laid out row-major as `zs[i][j] = z(xs[i], ys[j])`.
/// Local volatility surfaces use time as `x` and strike or moneyness as `y`.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::BilinearInterpolator;
///
/// let xs = [0.0_f64, 1.0];
/// let ys = [0.0, 1.0];
/// let zs = [&[0.0, 1.0][..], &[2.0, 3.0][..]];
///
/// let interp = BilinearInterpolator::new(&xs, &ys, &zs).unwrap();
/// assert!((interp.interpolate(0.5, 0.5).unwrap() - 1.5).abs() < 1e-12);
/// // Flat extension outside the grid
/// assert!((interp.interpolate_clamped(2.0, -1.0) - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BilinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
    zs: Vec<Vec<T>>,
}

impl<T: Float> BilinearInterpolator<T> {
    /// Construct a bilinear interpolator from grid data.
    ///
    /// # Arguments
    ///
    /// * `xs` - Strictly increasing x-axis nodes (at least 2)
    /// * `ys` - Strictly increasing y-axis nodes (at least 2)
    /// * `zs` - One row per x node, each row with one value per y node
    ///
    /// # Errors
    ///
    /// * `InterpolationError::InsufficientData` - Fewer than 2 nodes on an axis
    /// * `InterpolationError::NonMonotonicData` - Unsorted axis
    /// * `InterpolationError::InvalidInput` - Ragged grid or non-finite values
    pub fn new(xs: &[T], ys: &[T], zs: &[&[T]]) -> Result<Self, InterpolationError> {
        check_strictly_increasing(xs, 2)?;
        check_strictly_increasing(ys, 2)?;

        if zs.len() != xs.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "Grid rows ({}) must match x-axis length ({})",
                zs.len(),
                xs.len()
            )));
        }
        for (i, row) in zs.iter().enumerate() {
            if row.len() != ys.len() {
                return Err(InterpolationError::InvalidInput(format!(
                    "Grid row {} length ({}) must match y-axis length ({})",
                    i,
                    row.len(),
                    ys.len()
                )));
            }
            if row.iter().any(|z| !z.is_finite()) {
                return Err(InterpolationError::InvalidInput(format!(
                    "Grid row {} contains non-finite values",
                    i
                )));
            }
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            zs: zs.iter().map(|row| row.to_vec()).collect(),
        })
    }

    /// Interpolate at `(x, y)`, failing outside the grid.
    ///
    /// ```text
    /// z = (1-u)(1-v)*z00 + u*(1-v)*z10 + (1-u)*v*z01 + u*v*z11
    /// ```
    pub fn interpolate(&self, x: T, y: T) -> Result<T, InterpolationError> {
        check_inside(x, self.domain_x())?;
        check_inside(y, self.domain_y())?;
        Ok(self.cell_value(x, y))
    }

    /// Interpolate at `(x, y)` after clamping both coordinates onto the grid.
    pub fn interpolate_clamped(&self, x: T, y: T) -> T {
        let (x_min, x_max) = self.domain_x();
        let (y_min, y_max) = self.domain_y();
        self.cell_value(x.max(x_min).min(x_max), y.max(y_min).min(y_max))
    }

    /// X-axis domain.
    #[inline]
    pub fn domain_x(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Y-axis domain.
    #[inline]
    pub fn domain_y(&self) -> (T, T) {
        (self.ys[0], self.ys[self.ys.len() - 1])
    }

    /// Grid values.
    #[inline]
    pub fn zs(&self) -> &[Vec<T>] {
        &self.zs
    }

    fn cell_value(&self, x: T, y: T) -> T {
        let i = lower_segment(&self.xs, x);
        let j = lower_segment(&self.ys, y);

        let u = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        let v = (y - self.ys[j]) / (self.ys[j + 1] - self.ys[j]);

        let one = T::one();
        (one - u) * (one - v) * self.zs[i][j]
            + u * (one - v) * self.zs[i + 1][j]
            + (one - u) * v * self.zs[i][j + 1]
            + u * v * self.zs[i + 1][j + 1]
    }
}

fn check_inside<T: Float>(x: T, (min, max): (T, T)) -> Result<(), InterpolationError> {
    if x < min || x > max {
        return Err(InterpolationError::OutOfBounds {
            x: x.to_f64().unwrap_or(f64::NAN),
            min: min.to_f64().unwrap_or(f64::NAN),
            max: max.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid() -> BilinearInterpolator<f64> {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 1.0, 2.0];
        let zs = [
            &[0.0, 1.0, 2.0][..],
            &[3.0, 4.0, 5.0][..],
            &[6.0, 7.0, 8.0][..],
        ];
        BilinearInterpolator::new(&xs, &ys, &zs).unwrap()
    }

    #[test]
    fn test_new_rejects_ragged_grid() {
        let zs = [&[0.0, 1.0][..], &[2.0][..]];
        let result = BilinearInterpolator::new(&[0.0, 1.0], &[0.0, 1.0], &zs);
        assert!(matches!(result, Err(InterpolationError::InvalidInput(_))));
    }

    #[test]
    fn test_new_rejects_unsorted_axis() {
        let zs = [&[0.0, 1.0][..], &[2.0, 3.0][..]];
        let result = BilinearInterpolator::new(&[1.0, 0.0], &[0.0, 1.0], &zs);
        assert_eq!(
            result.unwrap_err(),
            InterpolationError::NonMonotonicData { index: 1 }
        );
    }

    #[test]
    fn test_reproduces_nodes() {
        let interp = grid();
        assert_relative_eq!(interp.interpolate(1.0, 2.0).unwrap(), 5.0);
        assert_relative_eq!(interp.interpolate(2.0, 2.0).unwrap(), 8.0);
    }

    #[test]
    fn test_plane_is_exact() {
        // z = 3x + y is bilinear, so interpolation is exact everywhere
        let interp = grid();
        assert_relative_eq!(interp.interpolate(0.3, 1.7).unwrap(), 0.9 + 1.7, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_bounds() {
        let interp = grid();
        assert!(matches!(
            interp.interpolate(2.5, 1.0),
            Err(InterpolationError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_clamped_extends_flat() {
        let interp = grid();
        assert_relative_eq!(interp.interpolate_clamped(-1.0, 1.0), 1.0);
        assert_relative_eq!(interp.interpolate_clamped(5.0, 5.0), 8.0);
    }
}
