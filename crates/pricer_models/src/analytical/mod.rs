//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes price and the five Greeks (Delta, Gamma, Theta, Vega, Rho)
//! - Standard normal CDF/PDF used by the formulas
//!
//! ## Conventions
//!
//! - **Theta** is quoted per calendar day (annual theta / 365)
//! - **Vega** is quoted per 1 volatility point (∂V/∂σ / 100)
//! - **Rho** is quoted per 1 rate point (∂V/∂r / 100)
//! - **Degenerate input** (T ≤ 0 or σ ≤ 0) prices to an all-zero result

pub mod black_scholes;
pub mod distributions;

// Re-export main types at module level
pub use black_scholes::{price_and_greeks, GreeksResult, DAYS_PER_YEAR, PERCENT};
pub use distributions::{norm_cdf, norm_pdf};
