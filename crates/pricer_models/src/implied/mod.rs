//! Implied volatility by Newton-Raphson iteration on vega.
//!
//! Given an observed option premium, finds the volatility σ at which the
//! Black-Scholes price matches it:
//!
//! σₙ₊₁ = max(σₙ − (BS(σₙ) − P) / ∂BS/∂σ(σₙ), σ_min)
//!
//! The iteration starts at `initial_guess` (0.2), stops once
//! `|BS(σ) − P| < tolerance` (1e-6) or vega vanishes, and never runs more
//! than `max_iterations` (100) steps.
//!
//! ## Entry points
//!
//! - [`implied_volatility`]: positional, silent. Always returns an estimate.
//! - [`ImpliedVolSolver::solve`]: the same estimate plus how the iteration ended.
//! - [`ImpliedVolSolver::try_implied_volatility`]: strict, non-converged
//!   iterations become [`SolverError`](pricer_core::types::SolverError)s.

mod config;
mod solver;

pub use config::IvSolverConfig;
pub use solver::{implied_volatility, ImpliedVolSolution, ImpliedVolSolver, IvTermination};
