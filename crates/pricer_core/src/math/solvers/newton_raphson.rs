//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// How a Newton iteration ended.
///
/// Every variant still carries a usable iterate in [`NewtonOutcome::root`];
/// the termination only tells the caller how much to trust it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// `|f(x)| < tolerance` at the reported root.
    Converged,
    /// The derivative evaluated to exactly zero; another step would divide by zero.
    DerivativeVanished,
    /// The iteration cap was reached without meeting the tolerance.
    IterationsExhausted,
}

/// Result of a bounded Newton iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonOutcome<T: Float> {
    /// Latest iterate (the best available estimate of the root).
    pub root: T,
    /// Number of Newton updates applied.
    pub iterations: usize,
    /// `f` at the last evaluated point.
    ///
    /// For [`Termination::IterationsExhausted`] this is the value before the
    /// final update, since the final iterate is never evaluated.
    pub residual: T,
    /// Exit path taken by the iteration.
    pub termination: Termination,
}

impl<T: Float> NewtonOutcome<T> {
    /// Returns `true` if the iteration met its tolerance.
    #[inline]
    pub fn is_converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Converts the outcome into a strict result.
    ///
    /// # Errors
    ///
    /// * `SolverError::DerivativeNearZero` - iteration stopped on a zero derivative
    /// * `SolverError::MaxIterationsExceeded` - iteration cap reached
    pub fn into_result(self) -> Result<T, SolverError> {
        match self.termination {
            Termination::Converged => Ok(self.root),
            Termination::DerivativeVanished => Err(SolverError::DerivativeNearZero {
                x: self.root.to_f64().unwrap_or(f64::NAN),
            }),
            Termination::IterationsExhausted => Err(SolverError::MaxIterationsExceeded {
                iterations: self.iterations,
            }),
        }
    }
}

/// Newton-Raphson root finder.
///
/// Uses Newton's method: `x_{n+1} = max(x_n - f(x_n) / f'(x_n), lower_bound)`
/// for fast quadratic convergence on smooth functions.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Convergence
///
/// Newton-Raphson converges quadratically near a root, meaning the number
/// of correct digits approximately doubles each iteration. It may stall if:
/// - The derivative vanishes
/// - The initial guess is far from the root
/// - The lower bound keeps clamping the iterate
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// // Solve x² - 2 = 0 (find √2)
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let outcome = solver.iterate_bounded(|x: f64| (x * x - 2.0, 2.0 * x), 1.0, 0.0);
/// assert!(outcome.is_converged());
/// assert!((outcome.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Runs a bounded Newton iteration and always reports an estimate.
    ///
    /// Each step evaluates `eval(x) = (f(x), f'(x))` once, then:
    /// 1. stops as [`Termination::Converged`] if `|f(x)| < tolerance`,
    /// 2. stops as [`Termination::DerivativeVanished`] if `f'(x) == 0`,
    /// 3. otherwise updates `x ← max(x - f(x) / f'(x), lower_bound)`.
    ///
    /// After `max_iterations` updates the latest iterate is returned as
    /// [`Termination::IterationsExhausted`]. No step is ever rejected, so the
    /// result is deterministic for a given `eval` and `x0`.
    ///
    /// # Arguments
    ///
    /// * `eval` - Function returning the value and derivative at `x`
    /// * `x0` - Initial guess
    /// * `lower_bound` - Floor applied after every update
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig, Termination};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-12, 100));
    ///
    /// // x² + 1 has no real root; the floor keeps the iterate non-negative
    /// let outcome = solver.iterate_bounded(|x: f64| (x * x + 1.0, 2.0 * x), 0.5, 0.001);
    /// assert_ne!(outcome.termination, Termination::Converged);
    /// assert!(outcome.root >= 0.001);
    /// ```
    pub fn iterate_bounded<F>(&self, mut eval: F, x0: T, lower_bound: T) -> NewtonOutcome<T>
    where
        F: FnMut(T) -> (T, T),
    {
        let mut x = x0;
        let mut residual = T::zero();

        for iteration in 0..self.config.max_iterations {
            let (f_val, f_prime_val) = eval(x);
            residual = f_val;

            if f_val.abs() < self.config.tolerance {
                return NewtonOutcome {
                    root: x,
                    iterations: iteration,
                    residual,
                    termination: Termination::Converged,
                };
            }

            if f_prime_val == T::zero() {
                return NewtonOutcome {
                    root: x,
                    iterations: iteration,
                    residual,
                    termination: Termination::DerivativeVanished,
                };
            }

            x = (x - f_val / f_prime_val).max(lower_bound);
        }

        NewtonOutcome {
            root: x,
            iterations: self.config.max_iterations,
            residual,
            termination: Termination::IterationsExhausted,
        }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
