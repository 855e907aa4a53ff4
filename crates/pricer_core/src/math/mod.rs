//! Numerical building blocks.
//!
//! - [`interpolators`]: One- and two-dimensional interpolation
//! - [`solvers`]: Bracketing root finders

pub mod interpolators;
pub mod solvers;
