//! Reading values and derivatives off a terminal grid.

use pricer_core::math::interpolators::{Interpolator, NearestPointInterpolator};

use crate::pde::{GridAxis, PdeError, TerminalGrid};

/// Grid quantity read by [`GridResultExtractor::interpolate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridQuantity {
    /// Solution value.
    Value,
    /// First derivative along the grid axis.
    FirstDerivative,
    /// Second derivative along the grid axis.
    SecondDerivative,
}

/// Borrowing reader over a [`TerminalGrid`].
///
/// On a moneyness grid `V = F·v(m)` with `m = K/F`, so the strike
/// derivatives are read directly off the grid:
///
/// ```text
/// ∂V/∂K = v'(m)        ∂²V/∂K² = v''(m) / F
/// ```
///
/// On a forward-level grid the values are absolute and the derivatives are
/// taken in the forward, so the dual Greeks are not defined there.
#[derive(Clone, Copy, Debug)]
pub struct GridResultExtractor<'a> {
    grid: &'a TerminalGrid,
}

impl<'a> GridResultExtractor<'a> {
    /// Wraps a grid.
    pub fn new(grid: &'a TerminalGrid) -> Self {
        Self { grid }
    }

    /// The wrapped grid.
    #[inline]
    pub fn grid(&self) -> &'a TerminalGrid {
        self.grid
    }

    /// Value at node `i`.
    #[inline]
    pub fn value(&self, i: usize) -> Option<f64> {
        self.grid.values().get(i).copied()
    }

    /// First derivative at node `i`.
    #[inline]
    pub fn first_derivative(&self, i: usize) -> Option<f64> {
        self.grid.first_derivatives().get(i).copied()
    }

    /// Second derivative at node `i`.
    #[inline]
    pub fn second_derivative(&self, i: usize) -> Option<f64> {
        self.grid.second_derivatives().get(i).copied()
    }

    /// Index of the node exactly at `x`.
    pub fn index_of(&self, x: f64) -> Option<usize> {
        self.grid.nodes().iter().position(|&node| node == x)
    }

    /// Dual delta `∂V/∂K` at node `i` of a moneyness grid.
    ///
    /// `None` on a forward-level grid, whose derivatives are taken in the
    /// forward and not in the strike.
    #[inline]
    pub fn dual_delta(&self, i: usize) -> Option<f64> {
        match self.grid.axis() {
            GridAxis::Moneyness => self.first_derivative(i),
            GridAxis::ForwardLevel => None,
        }
    }

    /// Dual gamma `∂²V/∂K²` at node `i` of a moneyness grid.
    ///
    /// `None` on a forward-level grid.
    #[inline]
    pub fn dual_gamma(&self, i: usize) -> Option<f64> {
        match self.grid.axis() {
            GridAxis::Moneyness => Some(self.second_derivative(i)? / self.grid.forward()),
            GridAxis::ForwardLevel => None,
        }
    }

    /// `quantity` at `x` through the nearest-four-point interpolator.
    ///
    /// # Errors
    ///
    /// `PdeError::OutOfDomain` if `x` is outside the grid.
    pub fn interpolate(&self, quantity: GridQuantity, x: f64) -> Result<f64, PdeError> {
        let (min, max) = self.grid.domain();
        if !(x >= min && x <= max) {
            return Err(PdeError::OutOfDomain { x, min, max });
        }
        let ys = match quantity {
            GridQuantity::Value => self.grid.values(),
            GridQuantity::FirstDerivative => self.grid.first_derivatives(),
            GridQuantity::SecondDerivative => self.grid.second_derivatives(),
        };
        let interpolator = NearestPointInterpolator::four_point(self.grid.nodes(), ys)?;
        Ok(interpolator.interpolate(x)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cubic_grid(axis: GridAxis) -> TerminalGrid {
        let nodes: Vec<f64> = (0..=20).map(|i| 0.1 * i as f64).collect();
        let values = nodes.iter().map(|x| x * x * x).collect();
        TerminalGrid::new(nodes, values, 50.0, 1.0, axis).unwrap()
    }

    #[test]
    fn test_node_access() {
        let grid = cubic_grid(GridAxis::Moneyness);
        let extractor = GridResultExtractor::new(&grid);

        assert_eq!(extractor.index_of(grid.nodes()[5]), Some(5));
        assert_eq!(extractor.index_of(0.123), None);
        assert_eq!(extractor.value(5), Some(grid.values()[5]));
        assert_eq!(extractor.value(21), None);
        assert_eq!(extractor.dual_delta(7), Some(grid.first_derivatives()[7]));
    }

    #[test]
    fn test_dual_gamma_scaling() {
        let grid = cubic_grid(GridAxis::Moneyness);
        let extractor = GridResultExtractor::new(&grid);
        assert_eq!(
            extractor.dual_gamma(4),
            Some(grid.second_derivatives()[4] / 50.0)
        );
        assert_eq!(extractor.dual_gamma(21), None);
    }

    #[test]
    fn test_forward_level_grid_has_no_dual_greeks() {
        let grid = cubic_grid(GridAxis::ForwardLevel);
        let extractor = GridResultExtractor::new(&grid);
        assert_eq!(extractor.dual_delta(4), None);
        assert_eq!(extractor.dual_gamma(4), None);
        // Forward derivatives stay readable
        assert_eq!(extractor.first_derivative(4), Some(grid.first_derivatives()[4]));
    }

    #[test]
    fn test_interpolate() {
        let grid = cubic_grid(GridAxis::Moneyness);
        let extractor = GridResultExtractor::new(&grid);
        assert_relative_eq!(
            extractor.interpolate(GridQuantity::Value, 0.55).unwrap(),
            0.55_f64.powi(3),
            max_relative = 1e-12
        );

        match extractor.interpolate(GridQuantity::Value, 2.5).unwrap_err() {
            PdeError::OutOfDomain { x, max, .. } => {
                assert_eq!(x, 2.5);
                assert_relative_eq!(max, 2.0);
            }
            _ => panic!("Expected OutOfDomain"),
        }
    }
}
