//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: Errors from date construction and parsing
//! - `SolverError`: Errors from root-finding solvers run in strict mode

use thiserror::Error;

/// Date-related errors.
///
/// Provides structured error handling for date construction and parsing
/// with descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

/// Root-finding solver errors.
///
/// Only produced when a caller asks for a strict answer; the default
/// solver paths always return their best estimate instead.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `DerivativeNearZero`: Derivative vanished during Newton-Raphson
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Derivative vanished (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where the derivative vanished
        x: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_error_invalid_date_display() {
        let err = DateError::InvalidDate {
            year: 2024,
            month: 13,
            day: 1,
        };
        assert_eq!(format!("{}", err), "Invalid date: 2024-13-1");
    }

    #[test]
    fn test_date_error_parse_error_display() {
        let err = DateError::ParseError("premature end of input".to_string());
        assert_eq!(
            format!("{}", err),
            "Date parse error: premature end of input"
        );
    }

    #[test]
    fn test_solver_error_max_iterations_display() {
        let err = SolverError::MaxIterationsExceeded { iterations: 100 };
        assert_eq!(format!("{}", err), "Failed to converge after 100 iterations");
    }

    #[test]
    fn test_solver_error_derivative_near_zero_display() {
        let err = SolverError::DerivativeNearZero { x: 0.2 };
        assert_eq!(format!("{}", err), "Derivative near zero at x = 0.2");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = SolverError::MaxIterationsExceeded { iterations: 1 };
        let _: &dyn std::error::Error = &err;

        let err = DateError::ParseError(String::new());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_solver_error_clone_and_equality() {
        let err1 = SolverError::DerivativeNearZero { x: 1.5 };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
