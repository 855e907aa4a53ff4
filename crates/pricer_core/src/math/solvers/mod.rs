//! Root-finding solvers.
//!
//! - [`BrentSolver`]: Bracketing root finder combining bisection, secant and
//!   inverse quadratic interpolation; used to invert Black prices into
//!   implied volatilities
//! - [`SolverConfig`]: Tolerance and iteration limits shared by solvers
//!
//! # Example
//!
//! ```
//! use pricer_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! let solver = BrentSolver::new(SolverConfig::default());
//! let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod brent;
mod config;

pub use brent::BrentSolver;
pub use config::SolverConfig;
