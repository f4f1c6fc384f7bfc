//! # Pricer Models (L2: Pricing Engine)
//!
//! Closed-form option analytics for equity-index option chains.
//!
//! This crate provides:
//! - Option side and market parameter value types (`instruments`)
//! - Black-Scholes price and the five Greeks (`analytical`)
//! - Newton-Raphson implied volatility on vega (`implied`)
//!
//! ## Design Principles
//!
//! - **Pure functions**: no I/O, no shared state; every call is independent
//!   and safe to run concurrently
//! - **Total over degenerate input**: expired contracts or zero volatility
//!   yield all-zero results rather than errors
//! - **Generic over `T: Float`**: the same formulas serve `f64` and `f32`
//!
//! ## Example
//!
//! ```
//! use pricer_models::analytical::price_and_greeks;
//! use pricer_models::implied::implied_volatility;
//! use pricer_models::instruments::{MarketParameters, OptionSide};
//!
//! let params = MarketParameters::new(100.0_f64, 100.0, 0.5, 0.06, 0.2, OptionSide::Call);
//! let greeks = price_and_greeks(&params);
//!
//! let sigma = implied_volatility(greeks.price, 100.0, 100.0, 0.5, 0.06, OptionSide::Call, 100, 1e-6);
//! assert!((sigma - 0.2).abs() < 1e-4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod implied;
pub mod instruments;
