//! # pricer_core: Market Data and Numerical Foundations
//!
//! Foundation layer of the local volatility PDE workspace. Everything above
//! this crate (analytical formulas, the finite-difference engine) consumes
//! market data and numerical tools exclusively through the types defined here.
//!
//! ## Modules
//!
//! - [`market_data`]: Forward curves, local volatility surfaces and the
//!   strike/moneyness surface converter
//! - [`math`]: Interpolators (linear, bilinear, nearest-point Lagrange) and
//!   root-finding solvers
//! - [`types`]: Structured error types shared by the whole workspace
//!
//! ## Design
//!
//! Market data traits are generic over `T: Float` and all implementations are
//! immutable values. Producing a shifted curve or surface always returns a new
//! object, so the same inputs can be shared across worker threads without
//! synchronisation.
//!
//! ## Example
//!
//! ```
//! use pricer_core::market_data::curves::{ForwardCurve, FlatForwardCurve};
//! use pricer_core::market_data::surfaces::{
//!     to_moneyness_surface, FlatLocalVol, LocalVolatilitySurface,
//! };
//!
//! let curve = FlatForwardCurve::new(100.0_f64).unwrap();
//! let strike_surface = FlatLocalVol::strike(0.2).unwrap();
//! let moneyness_surface = to_moneyness_surface(&strike_surface, &curve).unwrap();
//!
//! let sigma = moneyness_surface.volatility(1.0, 1.1).unwrap();
//! assert_eq!(sigma, 0.2);
//! assert_eq!(curve.forward(2.0).unwrap(), 100.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
