//! # Smile Demo
//!
//! Prices a local volatility Greek smile from a TOML description of the
//! forward curve, the surface and the option shape.
//!
//! ## Features
//!
//! - **Forward method**: One Dupire solve, Greeks resolved at each strike
//! - **Backward method**: One backward solve set per strike
//! - **Output**: Aligned table or JSON

pub mod config;
pub mod error;
pub mod smile;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Method, OptionType, SmileConfig, SurfaceConfig};
    pub use crate::error::SmileError;
    pub use crate::smile::{run, OutputFormat, SmileReport, SmileRow};
}
