//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder.
///
/// Keeps a bracket `[b, c]` with `f(b)·f(c) <= 0` and, at every step, tries
/// inverse quadratic interpolation (or the secant step when only two distinct
/// points are known), falling back to bisection whenever the interpolated step
/// would leave the bracket or converge too slowly. Convergence is therefore
/// guaranteed for any continuous function with a valid bracket.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!(f(root).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Find a root of `f` in the bracket `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// * `SolverError::NoBracket` - `f(lower)` and `f(upper)` have the same sign
    /// * `SolverError::NumericalInstability` - `f` returned a non-finite value
    /// * `SolverError::MaxIterationsExceeded` - No convergence within the iteration limit
    pub fn find_root<F>(&self, f: F, lower: T, upper: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let two = T::one() + T::one();
        let three = two + T::one();
        let half = T::one() / two;
        let tol = self.config.tolerance;

        let mut a = lower;
        let mut b = upper;
        let mut fa = checked(&f, a)?;
        let mut fb = checked(&f, b)?;

        if fa == T::zero() {
            return Ok(a);
        }
        if fb == T::zero() {
            return Ok(b);
        }
        if fa.signum() == fb.signum() {
            return Err(SolverError::NoBracket {
                a: lower.to_f64().unwrap_or(f64::NAN),
                b: upper.to_f64().unwrap_or(f64::NAN),
            });
        }

        let mut c = b;
        let mut fc = fb;
        let mut d = b - a;
        let mut e = d;

        for _ in 0..self.config.max_iterations {
            // Re-establish the bracket [b, c]
            if fb.signum() == fc.signum() {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            // b is always the best estimate
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol1 = two * T::epsilon() * b.abs() + half * tol;
            let xm = half * (c - b);
            if xm.abs() <= tol1 || fb.abs() < tol {
                return Ok(b);
            }

            if e.abs() >= tol1 && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    // Secant step
                    (two * xm * s, T::one() - s)
                } else {
                    // Inverse quadratic interpolation
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (two * xm * q * (q - r) - (b - a) * (r - T::one())),
                        (q - T::one()) * (r - T::one()) * (s - T::one()),
                    )
                };
                if p > T::zero() {
                    q = -q;
                }
                p = p.abs();

                let min1 = three * xm * q - (tol1 * q).abs();
                let min2 = (e * q).abs();
                if two * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = xm;
                    e = d;
                }
            } else {
                d = xm;
                e = d;
            }

            a = b;
            fa = fb;
            b = if d.abs() > tol1 {
                b + d
            } else if xm > T::zero() {
                b + tol1
            } else {
                b - tol1
            };
            fb = checked(&f, b)?;
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }
}

fn checked<T: Float, F: Fn(T) -> T>(f: &F, x: T) -> Result<T, SolverError> {
    let fx = f(x);
    if fx.is_finite() {
        Ok(fx)
    } else {
        Err(SolverError::NumericalInstability(format!(
            "non-finite function value at x = {}",
            x.to_f64().unwrap_or(f64::NAN)
        )))
    }
}
