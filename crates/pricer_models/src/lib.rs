//! # Pricer Models
//!
//! Option contracts and closed-form Black formulas.
//!
//! This crate provides:
//! - [`instruments`]: The European vanilla option descriptor priced by the PDE engine
//! - [`analytical`]: Black prices and Greeks on the forward, implied volatility
//!
//! The Black formulas serve two purposes: they anchor the PDE engine in
//! tests (a flat local volatility surface must reproduce Black), and they
//! turn PDE prices into Black-equivalent Greeks through the implied volatility.
//!
//! ## Example
//!
//! ```
//! use pricer_models::analytical::{implied_volatility, Black76};
//! use pricer_models::instruments::EuropeanVanillaOption;
//!
//! let option = EuropeanVanillaOption::put(95.0_f64, 0.5).unwrap();
//! let black = Black76::new(100.0, 0.25).unwrap();
//!
//! let price = black.price(option.strike(), option.time_to_expiry(), option.is_call());
//! let vol = implied_volatility(price, 100.0, 95.0, 0.5, false).unwrap();
//! assert!((vol - 0.25).abs() < 1e-9);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
