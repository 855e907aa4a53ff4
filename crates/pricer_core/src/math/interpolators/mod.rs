//! Interpolation over sorted node data.
//!
//! This module provides:
//! - [`Interpolator`]: Common trait for one-dimensional interpolators
//! - [`LinearInterpolator`]: Piecewise linear interpolation
//! - [`NearestPointInterpolator`]: Local Lagrange polynomial through the
//!   nearest `N` nodes (default four), used to read results between PDE grid nodes
//! - [`BilinearInterpolator`]: Two-dimensional grid interpolation
//!
//! All interpolators require strictly increasing abscissae and reject data
//! that is unsorted, non-finite or too short.

mod bilinear;
mod lagrange;
mod linear;
mod traits;

pub use bilinear::BilinearInterpolator;
pub use lagrange::NearestPointInterpolator;
pub use linear::LinearInterpolator;
pub use traits::Interpolator;

use crate::types::InterpolationError;
use num_traits::Float;

/// Validate an abscissa array: at least `need` points, all finite, strictly increasing.
pub(crate) fn check_strictly_increasing<T: Float>(
    xs: &[T],
    need: usize,
) -> Result<(), InterpolationError> {
    if xs.len() < need {
        return Err(InterpolationError::InsufficientData {
            got: xs.len(),
            need,
        });
    }
    for (i, x) in xs.iter().enumerate() {
        if !x.is_finite() {
            return Err(InterpolationError::InvalidInput(format!(
                "non-finite abscissa at index {}",
                i
            )));
        }
        if i > 0 && *x <= xs[i - 1] {
            return Err(InterpolationError::NonMonotonicData { index: i });
        }
    }
    Ok(())
}

/// Index `i` such that `xs[i] <= x < xs[i + 1]`, clamped to `[0, n - 2]`.
#[inline]
pub(crate) fn lower_segment<T: Float>(xs: &[T], x: T) -> usize {
    let pos = xs.partition_point(|&xi| xi <= x);
    if pos == 0 {
        0
    } else if pos >= xs.len() {
        xs.len() - 2
    } else {
        pos - 1
    }
}
