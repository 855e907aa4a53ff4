//! Core error types.
//!
//! - `error`: Structured error types for pricing, interpolation, and solver operations
//!
//! # Re-exports
//!
//! [`PricingError`], [`InterpolationError`] and [`SolverError`] are re-exported
//! at this module level.

pub mod error;

pub use error::{InterpolationError, PricingError, SolverError};
