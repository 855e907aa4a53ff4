//! Local volatility surfaces.
//!
//! This module provides:
//! - [`LocalVolatilitySurface`]: Generic trait for `σ(t, x)` lookup
//! - [`SurfaceCoordinate`]: Whether `x` is a strike or a moneyness
//! - [`FlatLocalVol`]: Constant volatility
//! - [`GridLocalVol`]: Bilinear grid surface with flat extrapolation
//! - [`FunctionalLocalVol`]: Closure-backed parametric surface
//! - [`ShiftedLocalVol`]: Parallel volatility shift of another surface
//! - [`to_moneyness_surface`] / [`to_strike_surface`]: Coordinate converters

mod converter;
mod flat;
mod functional;
mod interpolated;
mod shifted;
mod traits;

pub use converter::{to_moneyness_surface, to_strike_surface, MoneynessSurface, StrikeSurface};
pub use flat::FlatLocalVol;
pub use functional::FunctionalLocalVol;
pub use interpolated::GridLocalVol;
pub use shifted::ShiftedLocalVol;
pub use traits::{LocalVolatilitySurface, SurfaceCoordinate};
