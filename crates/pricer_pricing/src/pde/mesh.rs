//! Time and space meshes.
//!
//! Three node generators are provided:
//!
//! - [`exponential`]: `x_i = l + (u - l)(1 - e^{λ i/(n-1)}) / (1 - e^λ)`,
//!   uniform when `λ = 0`, denser near `l` for `λ > 0`
//! - [`double_exponential`]: two exponential halves meeting at a centre,
//!   denser near both ends
//! - [`hyperbolic`]: `x_i = c + α sinh(c1 + (c2 - c1) i/(n-1))`, denser
//!   around the centre `c`
//!
//! [`MeshPlanner`] picks the generator and domain per solve direction.

use super::config::PdeConfig;
use super::error::ConfigError;

/// Direction of the PDE solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Forward (Dupire) equation in expiry, grid indexed by moneyness.
    Forward,
    /// Backward equation in time to expiry, grid indexed by forward level.
    Backward,
}

/// Plans the time and space meshes of a solve.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::pde::{Direction, MeshPlanner, PdeConfig};
///
/// let planner = MeshPlanner::new(&PdeConfig::default());
///
/// let times = planner.time_mesh(1.0, Direction::Forward).unwrap();
/// assert_eq!(times.len(), 101);
///
/// let space = planner.space_mesh(3.5, 1.0).unwrap();
/// assert_eq!(space[0], 0.0);
/// assert_eq!(space[space.len() - 1], 3.5);
/// assert!(space.contains(&1.0));
/// ```
#[derive(Clone, Debug)]
pub struct MeshPlanner {
    config: PdeConfig,
}

impl MeshPlanner {
    /// Creates a planner from the engine configuration.
    pub fn new(config: &PdeConfig) -> Self {
        Self { config: *config }
    }

    /// Time mesh from 0 to `expiry`.
    ///
    /// Forward solves use an exponential mesh bunched at the start, backward
    /// solves a double exponential mesh around `expiry / 2`.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidParameter` if `expiry` is not positive and finite.
    pub fn time_mesh(&self, expiry: f64, direction: Direction) -> Result<Vec<f64>, ConfigError> {
        if !(expiry > 0.0 && expiry.is_finite()) {
            return Err(ConfigError::InvalidParameter {
                name: "expiry",
                value: format!("must be positive, got {}", expiry),
            });
        }
        let n = self.config.time_steps() + 1;
        let lambda = self.config.time_bunching();
        match direction {
            Direction::Forward => exponential(0.0, expiry, n, lambda),
            Direction::Backward => double_exponential(0.0, expiry, 0.5 * expiry, n, lambda),
        }
    }

    /// Space mesh on `[0, upper]` concentrated around `centre`.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidParameter` if `centre` is not inside `(0, upper)`.
    pub fn space_mesh(&self, upper: f64, centre: f64) -> Result<Vec<f64>, ConfigError> {
        hyperbolic(
            0.0,
            upper,
            centre,
            self.config.space_steps() + 1,
            self.config.space_bunching(),
        )
    }

    /// Upper end of the space domain for `direction`.
    ///
    /// Forward grids are in moneyness and end at the domain multiple, backward
    /// grids are in forward level and end at the domain multiple of `forward`.
    #[inline]
    pub fn space_upper(&self, direction: Direction, forward: f64) -> f64 {
        match direction {
            Direction::Forward => self.config.domain_multiple(),
            Direction::Backward => self.config.domain_multiple() * forward,
        }
    }
}

/// Exponentially bunched nodes on `[lower, upper]`.
///
/// # Errors
///
/// `ConfigError` if `n < 2`, the bounds are not finite and increasing, or
/// `lambda` is not finite.
pub fn exponential(
    lower: f64,
    upper: f64,
    n: usize,
    lambda: f64,
) -> Result<Vec<f64>, ConfigError> {
    check_bounds(lower, upper, n)?;
    if !lambda.is_finite() {
        return Err(ConfigError::InvalidParameter {
            name: "lambda",
            value: format!("must be finite, got {}", lambda),
        });
    }

    let last = (n - 1) as f64;
    let mut nodes: Vec<f64> = (0..n)
        .map(|i| {
            let s = i as f64 / last;
            if lambda.abs() < 1e-12 {
                lower + (upper - lower) * s
            } else {
                lower + (upper - lower) * (lambda * s).exp_m1() / lambda.exp_m1()
            }
        })
        .collect();
    nodes[0] = lower;
    nodes[n - 1] = upper;
    Ok(nodes)
}

/// Two exponential halves meeting at `centre`, bunched towards both ends.
///
/// # Errors
///
/// `ConfigError` if `n < 3`, the bounds are invalid or `centre` is not
/// strictly inside `(lower, upper)`.
pub fn double_exponential(
    lower: f64,
    upper: f64,
    centre: f64,
    n: usize,
    lambda: f64,
) -> Result<Vec<f64>, ConfigError> {
    check_bounds(lower, upper, n)?;
    if n < 3 {
        return Err(ConfigError::InvalidParameter {
            name: "nodes",
            value: format!("{} nodes, a double-exponential mesh needs at least 3", n),
        });
    }
    check_centre(lower, upper, centre)?;

    let n_left = n / 2 + 1;
    let n_right = n - n_left + 1;
    let mut nodes = exponential(lower, centre, n_left, lambda)?;
    // Mirror a mesh bunched at the centre so the right half bunches at `upper`
    let right = exponential(centre, upper, n_right, lambda)?;
    nodes.extend(right.iter().rev().skip(1).map(|x| centre + upper - x));
    nodes[n - 1] = upper;
    Ok(nodes)
}

/// Hyperbolic-sine nodes on `[lower, upper]` concentrated around `centre`.
///
/// With `α = β(u - l)`, `c1 = asinh((l - centre)/α)` and
/// `c2 = asinh((u - centre)/α)`, node `i` is
/// `centre + α sinh(c1 + (c2 - c1) i/(n - 1))`. End nodes are pinned to the
/// bounds exactly and the node nearest `centre` is moved onto it, so results
/// at the centre are read without interpolation.
///
/// # Errors
///
/// `ConfigError` if `n < 2`, the bounds are invalid, `beta` is not positive
/// or `centre` is not strictly inside `(lower, upper)`.
pub fn hyperbolic(
    lower: f64,
    upper: f64,
    centre: f64,
    n: usize,
    beta: f64,
) -> Result<Vec<f64>, ConfigError> {
    check_bounds(lower, upper, n)?;
    if !(beta > 0.0 && beta.is_finite()) {
        return Err(ConfigError::InvalidParameter {
            name: "beta",
            value: format!("must be positive, got {}", beta),
        });
    }
    check_centre(lower, upper, centre)?;

    let alpha = beta * (upper - lower);
    let c1 = ((lower - centre) / alpha).asinh();
    let c2 = ((upper - centre) / alpha).asinh();
    let last = (n - 1) as f64;

    let mut nodes: Vec<f64> = (0..n)
        .map(|i| centre + alpha * (c1 + (c2 - c1) * i as f64 / last).sinh())
        .collect();
    nodes[0] = lower;
    nodes[n - 1] = upper;

    if n > 2 {
        let nearest = (1..n - 1)
            .min_by(|&a, &b| {
                (nodes[a] - centre)
                    .abs()
                    .total_cmp(&(nodes[b] - centre).abs())
            })
            .unwrap_or(1);
        nodes[nearest] = centre;
    }
    Ok(nodes)
}

fn check_bounds(lower: f64, upper: f64, n: usize) -> Result<(), ConfigError> {
    if n < 2 {
        return Err(ConfigError::InvalidStepCount {
            name: "nodes",
            steps: n,
        });
    }
    if !(lower.is_finite() && upper.is_finite() && lower < upper) {
        return Err(ConfigError::InvalidParameter {
            name: "bounds",
            value: format!("need finite lower < upper, got [{}, {}]", lower, upper),
        });
    }
    Ok(())
}

fn check_centre(lower: f64, upper: f64, centre: f64) -> Result<(), ConfigError> {
    if !(centre > lower && centre < upper) {
        return Err(ConfigError::InvalidParameter {
            name: "centre",
            value: format!("must lie in ({}, {}), got {}", lower, upper, centre),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn is_strictly_increasing(xs: &[f64]) -> bool {
        xs.windows(2).all(|w| w[0] < w[1])
    }

    // ========================================================================
    // Generators
    // ========================================================================

    #[test]
    fn test_exponential_zero_lambda_is_uniform() {
        let nodes = exponential(0.0, 2.0, 5, 0.0).unwrap();
        assert_eq!(nodes, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_exponential_bunches_at_lower_end() {
        let nodes = exponential(0.0, 1.0, 11, 5.0).unwrap();
        assert_eq!(nodes[0], 0.0);
        assert_eq!(nodes[10], 1.0);
        assert!(nodes[1] - nodes[0] < nodes[10] - nodes[9]);
        let expected = (0.5_f64).exp_m1() / (5.0_f64).exp_m1();
        assert_relative_eq!(nodes[1], expected, max_relative = 1e-14);
    }

    #[test]
    fn test_double_exponential_bunches_at_both_ends() {
        let nodes = double_exponential(0.0, 2.0, 1.0, 21, 5.0).unwrap();
        assert_eq!(nodes.len(), 21);
        assert_eq!(nodes[0], 0.0);
        assert_eq!(nodes[20], 2.0);
        assert!(nodes.contains(&1.0));
        assert!(is_strictly_increasing(&nodes));

        let first = nodes[1] - nodes[0];
        let last = nodes[20] - nodes[19];
        let middle = nodes[11] - nodes[10];
        assert_relative_eq!(first, last, max_relative = 1e-10);
        assert!(first < middle);
    }

    #[test]
    fn test_hyperbolic_pins_ends_and_centre() {
        let nodes = hyperbolic(0.0, 3.5, 1.0, 101, 0.05).unwrap();
        assert_eq!(nodes[0], 0.0);
        assert_eq!(nodes[100], 3.5);
        assert!(nodes.contains(&1.0));
        assert!(is_strictly_increasing(&nodes));

        let centre = nodes.iter().position(|&x| x == 1.0).unwrap();
        let near = nodes[centre + 1] - nodes[centre];
        let far = nodes[100] - nodes[99];
        assert!(near < far);
    }

    #[test]
    fn test_generator_errors() {
        assert!(matches!(
            exponential(0.0, 1.0, 1, 0.0),
            Err(ConfigError::InvalidStepCount { steps: 1, .. })
        ));
        match exponential(1.0, 1.0, 5, 0.0).unwrap_err() {
            ConfigError::InvalidParameter { name, .. } => assert_eq!(name, "bounds"),
            _ => panic!("Expected InvalidParameter"),
        }
        match hyperbolic(0.0, 3.5, 4.0, 11, 0.05).unwrap_err() {
            ConfigError::InvalidParameter { name, .. } => assert_eq!(name, "centre"),
            _ => panic!("Expected InvalidParameter"),
        }
        match hyperbolic(0.0, 3.5, 1.0, 11, 0.0).unwrap_err() {
            ConfigError::InvalidParameter { name, .. } => assert_eq!(name, "beta"),
            _ => panic!("Expected InvalidParameter"),
        }

        // Two nodes pass the shared bound check but cannot hold a centre
        let err = double_exponential(0.0, 2.0, 1.0, 2, 1.0).unwrap_err();
        assert!(err.to_string().contains("at least 3"));
        match err {
            ConfigError::InvalidParameter { name, .. } => assert_eq!(name, "nodes"),
            _ => panic!("Expected InvalidParameter"),
        }
    }

    // ========================================================================
    // Planner
    // ========================================================================

    #[test]
    fn test_planner_rejects_non_positive_expiry() {
        let planner = MeshPlanner::new(&PdeConfig::default());
        for expiry in [0.0, -1.0, f64::NAN] {
            match planner.time_mesh(expiry, Direction::Backward).unwrap_err() {
                ConfigError::InvalidParameter { name, .. } => assert_eq!(name, "expiry"),
                _ => panic!("Expected InvalidParameter"),
            }
        }
    }

    #[test]
    fn test_planner_domains() {
        let planner = MeshPlanner::new(&PdeConfig::default());
        assert_eq!(planner.space_upper(Direction::Forward, 100.0), 3.5);
        assert_eq!(planner.space_upper(Direction::Backward, 100.0), 350.0);

        let space = planner.space_mesh(350.0, 100.0).unwrap();
        assert_eq!(space.len(), 101);
        assert_eq!(space[100], 350.0);
        assert!(space.contains(&100.0));

        let times = planner.time_mesh(2.0, Direction::Backward).unwrap();
        assert_eq!(times.len(), 101);
        assert_eq!(times[0], 0.0);
        assert_eq!(times[100], 2.0);
    }

    proptest! {
        #[test]
        fn prop_meshes_strictly_increasing(
            steps in 2usize..300,
            lambda in -8.0f64..8.0,
            beta in 0.01f64..1.0,
            centre_frac in 0.05f64..0.95,
            upper in 0.5f64..500.0,
        ) {
            let n = steps + 1;
            let e = exponential(0.0, upper, n, lambda).unwrap();
            prop_assert_eq!(e.len(), n);
            prop_assert!(is_strictly_increasing(&e));

            let d = double_exponential(0.0, upper, 0.5 * upper, n, lambda).unwrap();
            prop_assert_eq!(d.len(), n);
            prop_assert!(is_strictly_increasing(&d));

            let h = hyperbolic(0.0, upper, centre_frac * upper, n, beta).unwrap();
            prop_assert_eq!(h.len(), n);
            prop_assert!(is_strictly_increasing(&h));
            prop_assert_eq!(h[0], 0.0);
            prop_assert_eq!(h[n - 1], upper);
        }
    }
}
