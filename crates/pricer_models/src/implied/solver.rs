//! Newton-Raphson implied volatility solver.

use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig, Termination};
use pricer_core::traits::Float;
use pricer_core::types::SolverError;

use super::IvSolverConfig;
use crate::analytical::{price_and_greeks, PERCENT};
use crate::instruments::{MarketParameters, OptionSide};

/// How an implied volatility search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IvTermination {
    /// Model price within tolerance of the market price.
    Converged,
    /// Vega evaluated to exactly zero; the last iterate is reported.
    VegaVanished,
    /// Iteration cap reached; the last iterate is reported.
    IterationsExhausted,
    /// Expiry `T <= 0`; no iteration ran and the volatility is zero.
    NoTimeValue,
}

impl From<Termination> for IvTermination {
    fn from(termination: Termination) -> Self {
        match termination {
            Termination::Converged => IvTermination::Converged,
            Termination::DerivativeVanished => IvTermination::VegaVanished,
            Termination::IterationsExhausted => IvTermination::IterationsExhausted,
        }
    }
}

/// Implied volatility estimate with convergence diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedVolSolution<T: Float> {
    /// Volatility estimate (always populated).
    pub volatility: T,
    /// Newton updates applied.
    pub iterations: usize,
    /// Model price minus market price at the last evaluated volatility.
    pub residual: T,
    /// Exit path of the search.
    pub termination: IvTermination,
}

impl<T: Float> ImpliedVolSolution<T> {
    /// Returns `true` only for [`IvTermination::Converged`].
    #[inline]
    pub fn is_converged(&self) -> bool {
        self.termination == IvTermination::Converged
    }

    /// Converts into a strict result.
    ///
    /// An expired contract is not an iteration failure and maps to `Ok(0)`.
    ///
    /// # Errors
    ///
    /// * `SolverError::DerivativeNearZero` - vega vanished before convergence
    /// * `SolverError::MaxIterationsExceeded` - iteration cap reached
    pub fn into_result(self) -> Result<T, SolverError> {
        match self.termination {
            IvTermination::Converged | IvTermination::NoTimeValue => Ok(self.volatility),
            IvTermination::VegaVanished => Err(SolverError::DerivativeNearZero {
                x: self.volatility.to_f64().unwrap_or(f64::NAN),
            }),
            IvTermination::IterationsExhausted => Err(SolverError::MaxIterationsExceeded {
                iterations: self.iterations,
            }),
        }
    }
}

/// Implied volatility solver.
///
/// Each step reprices with [`price_and_greeks`] and divides the price error
/// by the unscaled vega (∂V/∂σ, i.e. the quoted per-point vega × 100).
///
/// # Examples
/// ```
/// use pricer_models::analytical::price_and_greeks;
/// use pricer_models::implied::{ImpliedVolSolver, IvTermination};
/// use pricer_models::instruments::{MarketParameters, OptionSide};
///
/// let params = MarketParameters::new(100.0_f64, 110.0, 0.25, 0.06, 0.45, OptionSide::Put);
/// let premium = price_and_greeks(&params).price;
///
/// let solver = ImpliedVolSolver::default();
/// let solution = solver.solve(premium, &params);
///
/// assert_eq!(solution.termination, IvTermination::Converged);
/// assert!((solution.volatility - 0.45).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpliedVolSolver<T: Float> {
    config: IvSolverConfig<T>,
}

impl<T: Float> ImpliedVolSolver<T> {
    /// Creates a solver with the given configuration.
    pub fn new(config: IvSolverConfig<T>) -> Self {
        Self { config }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &IvSolverConfig<T> {
        &self.config
    }

    /// Runs the search and reports the estimate with its diagnostics.
    ///
    /// `params.volatility` is ignored; spot, strike, expiry, rate and side
    /// describe the contract whose premium is `market_price`.
    pub fn solve(&self, market_price: T, params: &MarketParameters<T>) -> ImpliedVolSolution<T> {
        if params.expiry <= T::zero() {
            return ImpliedVolSolution {
                volatility: T::zero(),
                iterations: 0,
                residual: -market_price,
                termination: IvTermination::NoTimeValue,
            };
        }

        let percent = T::from(PERCENT).unwrap();
        let newton = NewtonRaphsonSolver::new(self.config.solver);
        let outcome = newton.iterate_bounded(
            |sigma| {
                let greeks = price_and_greeks(&params.with_volatility(sigma));
                (greeks.price - market_price, greeks.vega * percent)
            },
            self.config.initial_guess,
            self.config.min_volatility,
        );

        ImpliedVolSolution {
            volatility: outcome.root,
            iterations: outcome.iterations,
            residual: outcome.residual,
            termination: outcome.termination.into(),
        }
    }

    /// Silent variant of [`solve`](Self::solve): the estimate only, whether
    /// or not the iteration converged.
    #[inline]
    pub fn implied_volatility(&self, market_price: T, params: &MarketParameters<T>) -> T {
        self.solve(market_price, params).volatility
    }

    /// Strict variant of [`solve`](Self::solve).
    ///
    /// # Errors
    ///
    /// See [`ImpliedVolSolution::into_result`].
    pub fn try_implied_volatility(
        &self,
        market_price: T,
        params: &MarketParameters<T>,
    ) -> Result<T, SolverError> {
        self.solve(market_price, params).into_result()
    }
}

/// Implied volatility of a European option from its market premium.
///
/// Starts from σ = 0.2 with a floor of 0.001. Returns 0 when `expiry <= 0`.
/// The result is the last iterate whether or not it converged; use
/// [`ImpliedVolSolver::solve`] to find out.
///
/// # Examples
/// ```
/// use pricer_models::implied::implied_volatility;
/// use pricer_models::instruments::OptionSide;
///
/// let sigma: f64 = implied_volatility(11.2512, 100.0, 100.0, 0.5, 0.06, OptionSide::Call, 100, 1e-6);
/// assert!((sigma - 0.35).abs() < 1e-4);
///
/// assert_eq!(implied_volatility(5.0_f64, 100.0, 100.0, 0.0, 0.06, OptionSide::Call, 100, 1e-6), 0.0);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn implied_volatility<T: Float>(
    market_price: T,
    spot: T,
    strike: T,
    expiry: T,
    rate: T,
    side: OptionSide,
    max_iterations: usize,
    tolerance: T,
) -> T {
    let config = IvSolverConfig {
        solver: SolverConfig {
            tolerance,
            max_iterations,
        },
        ..IvSolverConfig::default()
    };
    let params = MarketParameters::new(spot, strike, expiry, rate, config.initial_guess, side);
    ImpliedVolSolver::new(config).implied_volatility(market_price, &params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn contract(strike: f64, expiry: f64, side: OptionSide) -> MarketParameters<f64> {
        MarketParameters::new(100.0, strike, expiry, 0.06, 0.2, side)
    }

    fn premium(params: &MarketParameters<f64>, sigma: f64) -> f64 {
        price_and_greeks(&params.with_volatility(sigma)).price
    }

    // ==========================================================
    // Convergence
    // ==========================================================

    #[test]
    fn test_initial_guess_already_exact() {
        let params = contract(100.0, 0.5, OptionSide::Call);
        let solution = ImpliedVolSolver::default().solve(premium(&params, 0.2), &params);
        assert_eq!(solution.volatility, 0.2);
        assert_eq!(solution.iterations, 0);
        assert!(solution.is_converged());
    }

    #[test]
    fn test_recovers_volatility_both_sides() {
        let cases = [
            (100.0, 0.5, OptionSide::Call, 0.35),
            (110.0, 0.25, OptionSide::Put, 0.45),
            (90.0, 1.0, OptionSide::Put, 0.15),
        ];
        let solver = ImpliedVolSolver::default();
        for (strike, expiry, side, sigma) in cases {
            let params = contract(strike, expiry, side);
            let solution = solver.solve(premium(&params, sigma), &params);
            assert_eq!(solution.termination, IvTermination::Converged);
            assert!(solution.iterations <= 5);
            assert!(solution.residual.abs() < 1e-6);
            assert_relative_eq!(solution.volatility, sigma, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_index_scale_weekly_contract() {
        let params = MarketParameters::new(22_000.0, 22_000.0, 7.0 / 365.0, 0.06, 0.2, OptionSide::Call);
        let price = premium(&params, 0.12);
        let sigma = ImpliedVolSolver::default().implied_volatility(price, &params);
        assert_relative_eq!(sigma, 0.12, epsilon = 1e-6);
    }

    #[test]
    fn test_high_premium_converges_above_one() {
        let params = contract(100.0, 0.5, OptionSide::Call);
        let solution = ImpliedVolSolver::default().solve(60.0, &params);
        assert!(solution.is_converged());
        assert_relative_eq!(solution.volatility, 2.3499, epsilon = 1e-4);
    }

    // ==========================================================
    // Non-converged exits still report an estimate
    // ==========================================================

    #[test]
    fn test_expired_contract_is_zero() {
        let params = contract(100.0, 0.0, OptionSide::Call);
        let solution = ImpliedVolSolver::default().solve(5.0, &params);
        assert_eq!(solution.volatility, 0.0);
        assert_eq!(solution.iterations, 0);
        assert_eq!(solution.termination, IvTermination::NoTimeValue);
        assert_eq!(solution.into_result(), Ok(0.0));
    }

    #[test]
    fn test_premium_below_intrinsic_hits_floor() {
        // Lower bound of an ATM call with r > 0 is S - K·e^(-rT) ≈ 2.96
        let params = contract(100.0, 0.5, OptionSide::Call);
        let solver = ImpliedVolSolver::default();
        let solution = solver.solve(0.5, &params);
        assert_eq!(solution.volatility, 0.001);
        assert_eq!(solution.termination, IvTermination::VegaVanished);
        assert!(matches!(
            solver.try_implied_volatility(0.5, &params),
            Err(SolverError::DerivativeNearZero { .. })
        ));
    }

    #[test]
    fn test_tiny_premium_overshoots_without_panicking() {
        // Vega underflows after a single huge step; the iterate is still returned
        let params = MarketParameters::new(100.0, 150.0, 0.1, 0.06, 0.2, OptionSide::Call);
        let solution = ImpliedVolSolver::default().solve(0.0001, &params);
        assert_eq!(solution.termination, IvTermination::VegaVanished);
        assert_eq!(solution.iterations, 1);
        assert!(solution.volatility.is_finite());
        assert!(solution.volatility > 1.0);
    }

    #[test]
    fn test_iteration_cap_reports_last_iterate() {
        let params = contract(100.0, 0.5, OptionSide::Call);
        let config = IvSolverConfig::default()
            .with_initial_guess(0.9)
            .with_max_iterations(2)
            .with_tolerance(1e-12);
        let solver = ImpliedVolSolver::new(config);

        let solution = solver.solve(premium(&params, 0.2), &params);
        assert_eq!(solution.termination, IvTermination::IterationsExhausted);
        assert_eq!(solution.iterations, 2);
        assert_relative_eq!(solution.volatility, 0.20004, epsilon = 1e-5);
        assert_eq!(
            solver.try_implied_volatility(premium(&params, 0.2), &params),
            Err(SolverError::MaxIterationsExceeded { iterations: 2 })
        );
    }

    #[test]
    fn test_zero_iteration_cap_returns_initial_guess() {
        let sigma = implied_volatility(7.0, 100.0, 100.0, 0.5, 0.06, OptionSide::Call, 0, 1e-6);
        assert_eq!(sigma, 0.2);
    }

    // ==========================================================
    // Free function
    // ==========================================================

    #[test]
    fn test_free_function_matches_solver() {
        let params = contract(110.0, 0.25, OptionSide::Put);
        let price = premium(&params, 0.45);
        let free = implied_volatility(price, 100.0, 110.0, 0.25, 0.06, OptionSide::Put, 100, 1e-6);
        let solved = ImpliedVolSolver::default().implied_volatility(price, &params);
        assert_eq!(free, solved);
    }

    #[test]
    fn test_ignores_input_volatility() {
        let solver = ImpliedVolSolver::default();
        let params = contract(100.0, 0.5, OptionSide::Call);
        let price = premium(&params, 0.3);
        assert_eq!(
            solver.implied_volatility(price, &params),
            solver.implied_volatility(price, &params.with_volatility(5.0))
        );
    }
}
