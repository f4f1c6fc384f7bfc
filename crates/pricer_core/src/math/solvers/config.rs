//! Stopping rule shared by the iterative solvers.

use num_traits::Float;

/// Residual tolerance and iteration cap of a root search.
///
/// A search stops successfully once `|f(x)| < tolerance` and gives up
/// after `max_iterations` updates.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let strict: SolverConfig<f64> = SolverConfig::default();
/// assert_eq!(strict.tolerance, 1e-10);
///
/// // Premium-level tolerance used for implied volatility
/// let premium = SolverConfig::new(1e-6, 100);
/// assert!(premium.is_valid());
/// assert!(!SolverConfig { max_iterations: 0, ..premium }.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// Largest accepted `|f(x)|`.
    pub tolerance: T,
    /// Newton updates allowed before
    /// [`Termination::IterationsExhausted`](super::Termination::IterationsExhausted).
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Tolerance 1e-10, 100 iterations.
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap(),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Builds a stopping rule from hard-coded values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`. Values read from
    /// configuration files should be built as a struct literal and checked
    /// with [`is_valid`](Self::is_valid) instead.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        let config = Self {
            tolerance,
            max_iterations,
        };
        assert!(
            config.is_valid(),
            "solver needs a positive finite tolerance and at least one iteration"
        );
        config
    }

    /// `true` for a positive finite tolerance and a non-zero iteration cap.
    pub fn is_valid(&self) -> bool {
        self.tolerance.is_finite() && self.tolerance > T::zero() && self.max_iterations > 0
    }
}
