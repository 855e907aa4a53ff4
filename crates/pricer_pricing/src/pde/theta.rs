//! Theta-method time stepping.
//!
//! Each step from `t_n` to `t_{n+1}` solves
//!
//! ```text
//! (I + θ Δt L_{n+1}) f_{n+1} = (I - (1 - θ) Δt L_n) f_n
//! ```
//!
//! where `L = a ∂² + b ∂ + c` is discretised with the non-uniform three-point
//! stencils. Boundary rows are replaced by the boundary conditions, which
//! keeps the system tridiagonal; it is solved with the Thomas algorithm.

use tracing::trace;

use super::boundary::{BoundaryCondition, BoundaryLocation};
use super::coefficients::PdeCoefficients;
use super::config::PdeConfig;
use super::error::{ConfigError, PdeError};
use super::stencil::Stencil;

/// Theta-method finite-difference solver.
///
/// `θ = 0` is explicit Euler, `θ = ½` Crank-Nicolson and `θ = 1` fully
/// implicit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThetaMethodSolver {
    theta: f64,
}

impl ThetaMethodSolver {
    /// Creates a solver with weight `theta`.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidParameter` if `theta` is outside `[0, 1]`.
    pub fn new(theta: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&theta) {
            return Err(ConfigError::InvalidParameter {
                name: "theta",
                value: format!("must be in [0, 1], got {}", theta),
            });
        }
        Ok(Self { theta })
    }

    /// Solver using the configured weight.
    #[inline]
    pub fn from_config(config: &PdeConfig) -> Self {
        Self {
            theta: config.theta(),
        }
    }

    /// Implicit weight.
    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Evolves `initial` across `times` and returns the terminal slice.
    ///
    /// # Errors
    ///
    /// - `PdeError::Config` for fewer than three space nodes, fewer than two
    ///   time nodes, unsorted meshes, a mismatched initial slice or boundary
    ///   conditions given for the wrong end
    /// - `PdeError::MarketData` if a coefficient lookup fails
    /// - `PdeError::SingularSystem` on a zero pivot
    /// - `PdeError::NonFinite` if a step produces a non-finite value
    pub fn solve<P>(
        &self,
        coefficients: &P,
        space: &[f64],
        times: &[f64],
        initial: Vec<f64>,
        lower: BoundaryCondition,
        upper: BoundaryCondition,
    ) -> Result<Vec<f64>, PdeError>
    where
        P: PdeCoefficients + ?Sized,
    {
        check_mesh("space", space, 3)?;
        check_mesh("times", times, 2)?;
        if initial.len() != space.len() {
            return Err(ConfigError::InvalidParameter {
                name: "initial",
                value: format!(
                    "expected {} values, got {}",
                    space.len(),
                    initial.len()
                ),
            }
            .into());
        }
        if lower.location() != BoundaryLocation::Lower || upper.location() != BoundaryLocation::Upper {
            return Err(ConfigError::InvalidParameter {
                name: "boundary",
                value: "conditions must be given as (lower, upper)".to_string(),
            }
            .into());
        }

        let n = space.len();
        let stencils = Stencil::interior(space);
        let mut values = initial;
        let mut explicit = operator(coefficients, &stencils, space, times[0])?;

        let mut sub = vec![0.0; n];
        let mut diag = vec![0.0; n];
        let mut sup = vec![0.0; n];
        let mut rhs = vec![0.0; n];

        for step in 1..times.len() {
            let dt = times[step] - times[step - 1];
            let implicit = operator(coefficients, &stencils, space, times[step])?;
            let w_explicit = (1.0 - self.theta) * dt;
            let w_implicit = self.theta * dt;

            for i in 1..n - 1 {
                let [l, c, u] = explicit[i - 1];
                rhs[i] = values[i]
                    - w_explicit * (l * values[i - 1] + c * values[i] + u * values[i + 1]);

                let [l, c, u] = implicit[i - 1];
                sub[i] = w_implicit * l;
                diag[i] = 1.0 + w_implicit * c;
                sup[i] = w_implicit * u;
            }
            apply_lower(&lower, space, &mut diag, &mut sup, &mut rhs);
            apply_upper(&upper, space, &mut sub, &mut diag, &mut rhs);

            values = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;
            if values.iter().any(|v| !v.is_finite()) {
                return Err(PdeError::NonFinite { step });
            }
            explicit = implicit;
        }

        trace!(nodes = n, steps = times.len() - 1, theta = self.theta, "theta-method solve");
        Ok(values)
    }
}

/// Discretised operator rows `(l, c, u)` of the interior nodes at time `t`.
fn operator<P>(
    coefficients: &P,
    stencils: &[Stencil],
    space: &[f64],
    t: f64,
) -> Result<Vec<[f64; 3]>, PdeError>
where
    P: PdeCoefficients + ?Sized,
{
    stencils
        .iter()
        .zip(&space[1..space.len() - 1])
        .map(|(s, &x)| {
            let a = coefficients.diffusion(t, x)?;
            let b = coefficients.convection(t, x)?;
            let c = coefficients.source(t, x)?;
            Ok([
                s.second[0] * a + s.first[0] * b,
                s.second[1] * a + s.first[1] * b + c,
                s.second[2] * a + s.first[2] * b,
            ])
        })
        .collect()
}

fn apply_lower(
    condition: &BoundaryCondition,
    space: &[f64],
    diag: &mut [f64],
    sup: &mut [f64],
    rhs: &mut [f64],
) {
    match *condition {
        BoundaryCondition::Dirichlet { level, .. } => {
            diag[0] = 1.0;
            sup[0] = 0.0;
            rhs[0] = level;
        }
        BoundaryCondition::Neumann { slope, .. } => {
            let dx = space[1] - space[0];
            diag[0] = -1.0 / dx;
            sup[0] = 1.0 / dx;
            rhs[0] = slope;
        }
    }
}

fn apply_upper(
    condition: &BoundaryCondition,
    space: &[f64],
    sub: &mut [f64],
    diag: &mut [f64],
    rhs: &mut [f64],
) {
    let n = space.len();
    match *condition {
        BoundaryCondition::Dirichlet { level, .. } => {
            sub[n - 1] = 0.0;
            diag[n - 1] = 1.0;
            rhs[n - 1] = level;
        }
        BoundaryCondition::Neumann { slope, .. } => {
            let dx = space[n - 1] - space[n - 2];
            sub[n - 1] = -1.0 / dx;
            diag[n - 1] = 1.0 / dx;
            rhs[n - 1] = slope;
        }
    }
}

/// Solves a tridiagonal system with the Thomas algorithm.
///
/// Row `i` reads `sub[i]·x[i-1] + diag[i]·x[i] + sup[i]·x[i+1] = rhs[i]`;
/// `sub[0]` and `sup[n-1]` are ignored.
///
/// # Errors
///
/// - `PdeError::Config` if the slices differ in length or are empty
/// - `PdeError::SingularSystem` on a zero pivot
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::pde::solve_tridiagonal;
///
/// let x = solve_tridiagonal(&[0.0, 1.0], &[2.0, 2.0], &[1.0, 0.0], &[3.0, 3.0]).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-15 && (x[1] - 1.0).abs() < 1e-15);
/// ```
pub fn solve_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> Result<Vec<f64>, PdeError> {
    let n = diag.len();
    if n == 0 || sub.len() != n || sup.len() != n || rhs.len() != n {
        return Err(ConfigError::InvalidParameter {
            name: "system",
            value: "tridiagonal bands and right-hand side must share a non-zero length"
                .to_string(),
        }
        .into());
    }

    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];

    if diag[0] == 0.0 {
        return Err(PdeError::SingularSystem { row: 0 });
    }
    c[0] = sup[0] / diag[0];
    d[0] = rhs[0] / diag[0];

    for i in 1..n {
        let pivot = diag[i] - sub[i] * c[i - 1];
        if pivot == 0.0 {
            return Err(PdeError::SingularSystem { row: i });
        }
        c[i] = if i + 1 < n { sup[i] / pivot } else { 0.0 };
        d[i] = (rhs[i] - sub[i] * d[i - 1]) / pivot;
    }

    let mut x = d;
    for i in (0..n - 1).rev() {
        x[i] -= c[i] * x[i + 1];
    }
    Ok(x)
}

fn check_mesh(name: &'static str, nodes: &[f64], need: usize) -> Result<(), ConfigError> {
    if nodes.len() < need {
        return Err(ConfigError::InvalidStepCount {
            name,
            steps: nodes.len().saturating_sub(1),
        });
    }
    if nodes.iter().any(|x| !x.is_finite()) || nodes.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ConfigError::InvalidParameter {
            name,
            value: "nodes must be finite and strictly increasing".to_string(),
        });
    }
    Ok(())
}
