//! Error types for chain sources.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while obtaining an option-chain snapshot.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The snapshot file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The payload is not valid option-chain JSON.
    #[error("Failed to parse option chain from {origin}: {source}")]
    Parse {
        /// File path or other description of where the payload came from
        origin: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The source holds no snapshot for the symbol.
    #[error("No option chain available for symbol {symbol}")]
    SymbolNotFound {
        /// Requested (upper-cased) symbol
        symbol: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_not_found_message() {
        let err = FeedError::SymbolNotFound {
            symbol: "BANKNIFTY".to_string(),
        };
        assert_eq!(err.to_string(), "No option chain available for symbol BANKNIFTY");
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let err = FeedError::Io {
            path: PathBuf::from("/missing/NIFTY.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/missing/NIFTY.json"));
        assert!(err.source().is_some());
    }
}
