//! Error types for chain aggregation.

use adapter_feeds::FeedError;
use pricer_core::types::DateError;
use thiserror::Error;

/// Reasons a chain report cannot be produced.
///
/// # Examples
/// ```
/// use pricer_chain::ChainError;
///
/// let err = ChainError::NoChainData { symbol: "NIFTY".to_string() };
/// assert_eq!(err.to_string(), "No option chain data found for NIFTY");
/// ```
#[derive(Debug, Error)]
pub enum ChainError {
    /// The snapshot holds no strike records.
    #[error("No option chain data found for {symbol}")]
    NoChainData {
        /// Requested symbol
        symbol: String,
    },

    /// The snapshot lists no expiry dates.
    #[error("No expiry dates found for {symbol}")]
    NoExpiryDates {
        /// Requested symbol
        symbol: String,
    },

    /// No record matches the selected expiry.
    #[error("No option rows found for expiry {expiry}")]
    NoRowsForExpiry {
        /// Selected expiry in exchange format
        expiry: String,
    },

    /// An expiry date could not be parsed.
    #[error(transparent)]
    Date(#[from] DateError),

    /// The snapshot could not be obtained.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// The aggregation settings are unusable.
    #[error("Invalid chain configuration: {0}")]
    InvalidConfig(String),
}
