//! Core time and error types.
//!
//! This module provides:
//! - `time`: Exchange date handling (`Date`, days-to-expiry, ACT/365 year fractions)
//! - `error`: Structured error types for date and solver operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`calendar_days_until`], [`year_fraction_act365`] from `time`
//! - [`DateError`], [`SolverError`] from `error`

pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DateError, SolverError};
pub use time::{calendar_days_until, year_fraction_act365, Date, DAYS_PER_YEAR};
