//! Greeks from PDE grids.
//!
//! This module provides:
//! - [`GreekKind`] and [`GreekValue`]: Reported quantities and their values
//! - [`GridResultExtractor`]: Values and derivatives read off a terminal grid
//! - [`LocalVolGreekEngine`]: Bump-and-revise Greeks over the forward and backward solvers
//! - [`GridGreekCollection`] and [`PointGreeks`]: Engine results
//! - [`SingleResultResolver`]: One Greek at an arbitrary strike
//!
//! # Pipeline
//!
//! ```text
//! solve base / forward up / forward down (concurrently) → combine per node → collection → resolver
//! ```

mod collection;
mod engine;
mod extractor;
mod kind;
mod resolver;

pub use collection::{GridGreekCollection, PointGreeks};
pub use engine::LocalVolGreekEngine;
pub use extractor::{GridQuantity, GridResultExtractor};
pub use kind::{GreekKind, GreekValue};
pub use resolver::SingleResultResolver;
