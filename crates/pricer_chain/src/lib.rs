//! # pricer_chain: Option Chain Analytics
//!
//! Turns an exchange option-chain snapshot into a per-strike table for the
//! nearest expiry: open interest and volume for both legs, implied
//! volatility and rounded Greeks, and put-call ratios.
//!
//! ## Pipeline
//!
//! 1. Resolve the underlying level (quoted value or median strike)
//! 2. Select the earliest listed expiry and count calendar days to it
//! 3. Price every call and put leg with a traded premium
//!    ([`VolatilityMode::MarketImplied`] solves IV first,
//!    [`VolatilityMode::Fixed`] uses a constant σ)
//! 4. Assemble rows in input order, in parallel for large chains
//!
//! ## Example
//!
//! ```
//! use adapter_feeds::OptionChainSnapshot;
//! use chrono::NaiveDate;
//! use pricer_chain::{ChainAggregator, ChainConfig};
//!
//! let snapshot = OptionChainSnapshot::from_json_str(r#"{"records": {
//!     "expiryDates": ["27-Jun-2024"],
//!     "underlyingValue": 22000.0,
//!     "data": [{"strikePrice": 22000, "expiryDate": "27-Jun-2024",
//!               "CE": {"lastPrice": 120.0, "openInterest": 50000},
//!               "PE": {"lastPrice": 105.3, "openInterest": 45000}}]
//! }}"#).unwrap();
//!
//! let as_of = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let report = ChainAggregator::new(ChainConfig::default())
//!     .build("nifty", &snapshot, as_of)
//!     .unwrap();
//!
//! assert_eq!(report.symbol, "NIFTY");
//! assert_eq!(report.days_to_expiry, 7);
//! assert_eq!(report.data[0].call.analytics.iv, 0.088);
//! assert_eq!(report.data[0].pcr_oi, 0.9);
//! ```

#![deny(missing_docs)]

pub mod aggregator;
pub mod config;
pub mod error;
pub mod leg;
pub mod parallel;
pub mod report;

pub use aggregator::ChainAggregator;
pub use config::{ChainConfig, VolatilityMode};
pub use error::ChainError;
pub use leg::{LegAnalytics, LegSummary};
pub use parallel::ParallelConfig;
pub use report::{ChainReport, ChainResponse, ChainRow, ChainSummary};
