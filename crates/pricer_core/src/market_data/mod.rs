//! Market data for local volatility pricing.
//!
//! # Components
//!
//! - [`curves`]: Forward curves `F(t)` with fractional bumping
//! - [`surfaces`]: Local volatility surfaces in strike or moneyness
//!   coordinates, and the converter between the two
//! - [`error`]: Market data error types (MarketDataError)
//!
//! All structures are generic over `T: Float`.
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{ForwardCurve, DriftForwardCurve};
//! use pricer_core::market_data::surfaces::{LocalVolatilitySurface, FlatLocalVol};
//!
//! let curve = DriftForwardCurve::new(100.0_f64, 0.03).unwrap();
//! assert!((curve.forward(1.0).unwrap() - 103.0454534).abs() < 1e-6);
//!
//! let surface = FlatLocalVol::moneyness(0.25_f64).unwrap();
//! assert_eq!(surface.volatility(0.5, 1.2).unwrap(), 0.25);
//! ```

pub mod curves;
pub mod error;
pub mod surfaces;

pub use curves::{DriftForwardCurve, FlatForwardCurve, ForwardCurve, InterpolatedForwardCurve};
pub use error::MarketDataError;
pub use surfaces::{
    to_moneyness_surface, to_strike_surface, FlatLocalVol, FunctionalLocalVol, GridLocalVol,
    LocalVolatilitySurface, MoneynessSurface, ShiftedLocalVol, StrikeSurface, SurfaceCoordinate,
};
