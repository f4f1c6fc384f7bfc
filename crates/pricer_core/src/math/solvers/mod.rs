//! Root-finding solvers for numerical computation.
//!
//! This module provides the Newton-Raphson iteration used to invert
//! option prices into implied volatilities.
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: Quadratic convergence using an explicit derivative,
//!   with a lower bound on the iterate and a best-estimate result on every exit path
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance on `|f(x)|` (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig, Termination};
//!
//! // Solve x² - 2 = 0 (find √2)
//! let solver = NewtonRaphsonSolver::new(SolverConfig::default());
//!
//! let outcome = solver.iterate_bounded(|x: f64| (x * x - 2.0, 2.0 * x), 1.0, 0.0);
//! assert_eq!(outcome.termination, Termination::Converged);
//! assert!((outcome.root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod config;
mod newton_raphson;

// Re-export public types at module level
pub use config::SolverConfig;
pub use newton_raphson::{NewtonOutcome, NewtonRaphsonSolver, Termination};
