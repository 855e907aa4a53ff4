//! # Pricer Pricing
//!
//! Finite-difference pricing and Greeks under local volatility.
//!
//! This crate provides:
//! - [`pde`]: Forward and backward PDE solvers, meshes, boundary conditions
//!   and the theta-method stepper
//! - [`greeks`]: Bump-and-revise Greeks, Black-equivalent Greeks and
//!   single-strike resolution
//!
//! ## Forward or backward
//!
//! The forward (Dupire) equation prices every strike of one expiry in a
//! single solve on a moneyness grid. The backward equation prices one strike
//! per solve on a forward-level grid; [`pde::BackwardPdeSolver::smile`]
//! solves several strikes in parallel. Prefer the forward solver for smiles.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::{FlatForwardCurve, FunctionalLocalVol, SurfaceCoordinate};
//! use pricer_models::instruments::EuropeanVanillaOption;
//! use pricer_pricing::greeks::{GreekKind, LocalVolGreekEngine, SingleResultResolver};
//! use pricer_pricing::pde::PdeConfig;
//!
//! let surface = FunctionalLocalVol::new(
//!     |_t: f64, k: f64| 0.25 - 0.05 * (k / 100.0 - 1.0).tanh(),
//!     SurfaceCoordinate::Strike,
//! );
//! let curve = FlatForwardCurve::new(100.0).unwrap();
//! let option = EuropeanVanillaOption::call(100.0, 1.0).unwrap();
//!
//! let engine = LocalVolGreekEngine::new(PdeConfig::default());
//! let greeks = engine.grid_greeks(&surface, &curve, &option).unwrap();
//!
//! let price = SingleResultResolver::new(&greeks, GreekKind::Price).result(105.0).unwrap();
//! let vol = SingleResultResolver::new(&greeks, GreekKind::ImpliedVol).result(105.0).unwrap();
//! assert!(price > 0.0);
//! assert!(vol > 0.15 && vol < 0.35);
//! ```
//!
//! ## Logging
//!
//! Solves emit `debug!` events, Greek runs one `info!` event and nodes
//! without an implied volatility a `warn!` event through `tracing`. Install
//! a subscriber in the binary to see them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod greeks;
pub mod pde;

pub use greeks::{GreekKind, GreekValue, GridGreekCollection, LocalVolGreekEngine, SingleResultResolver};
pub use pde::{BackwardPdeSolver, ForwardPdeSolver, PdeConfig, PdeError};
