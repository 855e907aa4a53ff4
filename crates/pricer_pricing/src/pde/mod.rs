//! Finite-difference solvers for the local volatility model.
//!
//! This module provides:
//! - [`PdeConfig`]: Numerical settings with builder and validation
//! - [`MeshPlanner`]: Time and space meshes per solve direction
//! - [`BoundaryConditionSelector`]: Boundary conditions per payoff and direction
//! - [`PdeCoefficients`]: Coefficient bundles of the solved equation
//! - [`ThetaMethodSolver`]: Theta-method stepping with a tridiagonal solve
//! - [`ForwardPdeSolver`]: Forward equation, one moneyness grid per expiry
//! - [`BackwardPdeSolver`]: Backward equation, one forward-level grid per strike
//! - [`TerminalGrid`]: Terminal slice with derivatives
//!
//! # Pipeline
//!
//! ```text
//! plan mesh → select boundary conditions → build coefficients → theta-method solve → TerminalGrid
//! ```
//!
//! # Example
//!
//! ```rust
//! use pricer_core::market_data::{FlatForwardCurve, FlatLocalVol};
//! use pricer_models::analytical::Black76;
//! use pricer_models::instruments::EuropeanVanillaOption;
//! use pricer_pricing::pde::{ForwardPdeSolver, PdeConfig};
//!
//! let surface = FlatLocalVol::strike(0.2).unwrap();
//! let curve = FlatForwardCurve::new(100.0).unwrap();
//! let option = EuropeanVanillaOption::call(100.0, 1.0).unwrap();
//!
//! let grid = ForwardPdeSolver::new(PdeConfig::default())
//!     .solve(&surface, &curve, &option)
//!     .unwrap();
//!
//! let atm = grid.nodes().iter().position(|&m| m == 1.0).unwrap();
//! let price = grid.forward() * grid.values()[atm];
//! let black = Black76::new(100.0, 0.2).unwrap().price(100.0, 1.0, true);
//! assert!((price - black).abs() < 1e-2);
//! ```

pub mod backward;
pub mod boundary;
pub mod coefficients;
pub mod config;
pub mod error;
pub mod forward;
pub mod grid;
pub mod mesh;
mod stencil;
pub mod theta;

pub use backward::BackwardPdeSolver;
pub use boundary::{BoundaryCondition, BoundaryConditionSelector, BoundaryLocation};
pub use coefficients::{BackwardLocalVolCoefficients, ForwardLocalVolCoefficients, PdeCoefficients};
pub use config::{PdeConfig, PdeConfigBuilder};
pub use error::{ConfigError, PdeError};
pub use forward::ForwardPdeSolver;
pub use grid::{GridAxis, TerminalGrid};
pub use mesh::{Direction, MeshPlanner};
pub use theta::{solve_tridiagonal, ThetaMethodSolver};
