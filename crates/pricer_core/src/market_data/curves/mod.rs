//! Forward curves.
//!
//! This module provides:
//! - [`ForwardCurve`]: Generic trait for forward price lookup and bumping
//! - [`FlatForwardCurve`]: Constant forward
//! - [`DriftForwardCurve`]: `S·exp(mu·t)` forward
//! - [`InterpolatedForwardCurve`]: Pillar-based forward, linear with flat ends

mod flat;
mod interpolated;
mod traits;

pub use flat::{DriftForwardCurve, FlatForwardCurve};
pub use interpolated::InterpolatedForwardCurve;
pub use traits::ForwardCurve;
