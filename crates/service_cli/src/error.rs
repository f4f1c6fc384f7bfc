//! CLI error types.

use pricer_chain::ChainError;
use pricer_core::types::{DateError, SolverError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The option chain report could not be built.
    #[error("{0}")]
    ChainFailed(String),

    /// A strict implied volatility search did not converge.
    #[error("Implied volatility did not converge: {0}")]
    Solver(#[from] SolverError),

    /// A date argument is malformed.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Input path does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Argument outside its valid range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV rendering failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<ChainError> for CliError {
    fn from(err: ChainError) -> Self {
        CliError::ChainFailed(err.to_string())
    }
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_error_message_preserved() {
        let err: CliError = ChainError::NoExpiryDates {
            symbol: "NIFTY".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "No expiry dates found for NIFTY");
    }

    #[test]
    fn test_solver_error_display() {
        let err: CliError = SolverError::MaxIterationsExceeded { iterations: 100 }.into();
        assert!(err.to_string().contains("did not converge"));
    }
}
