//! Implied volatility solver configuration.

use pricer_core::math::solvers::SolverConfig;
use pricer_core::traits::Float;

/// Starting point, floor and stopping rule of the implied volatility search.
///
/// # Examples
/// ```
/// use pricer_models::implied::IvSolverConfig;
///
/// let config = IvSolverConfig::<f64>::default();
/// assert_eq!(config.initial_guess, 0.2);
/// assert_eq!(config.min_volatility, 0.001);
/// assert_eq!(config.solver.tolerance, 1e-6);
/// assert_eq!(config.solver.max_iterations, 100);
///
/// let tight = config.with_tolerance(1e-10).with_max_iterations(50);
/// assert!(tight.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IvSolverConfig<T: Float> {
    /// First volatility tried.
    pub initial_guess: T,
    /// Lower bound applied after every Newton update.
    pub min_volatility: T,
    /// Price tolerance and iteration cap.
    pub solver: SolverConfig<T>,
}

impl<T: Float> Default for IvSolverConfig<T> {
    fn default() -> Self {
        Self {
            initial_guess: T::from(0.2).unwrap(),
            min_volatility: T::from(0.001).unwrap(),
            solver: SolverConfig {
                tolerance: T::from(1e-6).unwrap(),
                max_iterations: 100,
            },
        }
    }
}

impl<T: Float> IvSolverConfig<T> {
    /// Replaces the price tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.solver.tolerance = tolerance;
        self
    }

    /// Replaces the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.solver.max_iterations = max_iterations;
        self
    }

    /// Replaces the starting volatility.
    pub fn with_initial_guess(mut self, initial_guess: T) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// True when the stopping rule is usable and the floor sits below a
    /// positive starting point.
    pub fn is_valid(&self) -> bool {
        self.solver.is_valid()
            && self.min_volatility > T::zero()
            && self.initial_guess.is_finite()
            && self.initial_guess >= self.min_volatility
    }
}
