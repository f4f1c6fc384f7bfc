//! Instrument-level value types for European options.
//!
//! This module provides:
//! - `OptionSide`: Call or put
//! - `MarketParameters`: Spot, strike, expiry, rate, volatility and side of one contract

mod params;
mod side;

pub use params::MarketParameters;
pub use side::{OptionSide, ParseOptionSideError};
