//! # pricer_core: Numerical Foundation for Option Chain Analytics
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Root-finding solvers (`math::solvers`)
//! - The generic `Float` trait re-export (`traits`)
//! - Exchange date handling: `Date`, days-to-expiry, ACT/365 year fractions (`types::time`)
//! - Error types: `SolverError`, `DateError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig, Termination};
//! use pricer_core::types::Date;
//!
//! // Exchange-formatted expiry dates
//! let expiry = Date::parse_exchange("27-Jun-2024").unwrap();
//! assert_eq!(expiry.to_exchange_string(), "27-Jun-2024");
//!
//! // Bounded Newton iteration: solve x² - 2 = 0 with x >= 0.001
//! let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-12, 50));
//! let outcome = solver.iterate_bounded(|x: f64| (x * x - 2.0, 2.0 * x), 1.0, 0.001);
//! assert_eq!(outcome.termination, Termination::Converged);
//! # assert!((outcome.root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Date`, `SolverError` and solver termination states

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
