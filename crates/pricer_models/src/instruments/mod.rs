//! Instrument definitions.
//!
//! - [`EuropeanVanillaOption`]: European call or put
//! - [`InstrumentError`]: Construction errors

mod error;
mod vanilla;

pub use error::InstrumentError;
pub use vanilla::EuropeanVanillaOption;
