//! # adapter_feeds: Option Chain Input Adapters
//!
//! Adapter layer between exchange option-chain payloads and the analytics
//! crates. It provides:
//! - Serde models of the exchange option-chain JSON (`snapshot`)
//! - The [`ChainSource`] trait and its file-backed and in-memory
//!   implementations (`source`)
//! - [`FeedError`] for I/O, parse and lookup failures (`error`)
//!
//! ## Example
//!
//! ```
//! use adapter_feeds::{ChainSource, OptionChainSnapshot, StaticSource};
//!
//! let json = r#"{
//!     "records": {
//!         "expiryDates": ["27-Jun-2024"],
//!         "underlyingValue": 22000.0,
//!         "data": [{
//!             "strikePrice": 22000,
//!             "expiryDate": "27-Jun-2024",
//!             "CE": {"lastPrice": 120.0, "openInterest": 1500}
//!         }]
//!     }
//! }"#;
//!
//! let snapshot = OptionChainSnapshot::from_json_str(json).unwrap();
//! let source = StaticSource::new().with_snapshot("nifty", snapshot);
//!
//! let fetched = source.fetch("NIFTY").unwrap();
//! assert_eq!(fetched.records.data.len(), 1);
//! assert_eq!(fetched.records.data[0].put_quote().last_price, 0.0);
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod snapshot;
pub mod source;

pub use error::FeedError;
pub use snapshot::{ChainRecords, LegQuote, OptionChainSnapshot, StrikeRecord};
pub use source::{ChainSource, JsonFileSource, StaticSource};
