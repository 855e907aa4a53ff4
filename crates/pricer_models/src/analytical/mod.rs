//! Analytical formulas for European options on a forward.
//!
//! This module provides:
//! - Black model prices and Greeks (forward and strike sensitivities, vega,
//!   vanna, vomma)
//! - Black implied volatility inversion
//! - Standard normal distribution functions
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**
//! - **Undiscounted**: prices are forward-measure values
//! - **Explicit failure**: inversion outside the no-arbitrage band is an
//!   error, never a silent zero volatility

pub mod black;
pub mod distributions;
pub mod error;
pub mod implied_vol;

pub use black::{Black76, BlackGreeks};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use implied_vol::implied_volatility;
