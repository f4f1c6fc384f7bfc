//! Black-Scholes pricing model for European options.
//!
//! This module provides the closed-form price of a European call or put
//! together with its five standard Greeks.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use pricer_core::traits::Float;

use super::distributions::{norm_cdf, norm_pdf};
use crate::instruments::{MarketParameters, OptionSide};

pub use pricer_core::types::DAYS_PER_YEAR;

/// Scale between a unit sensitivity and a per-point (1%) sensitivity.
pub const PERCENT: f64 = 100.0;

/// Price and first-order sensitivities of one option.
///
/// # Units
/// - `theta`: change in value per calendar day
/// - `vega`: change in value per 1 volatility point
/// - `rho`: change in value per 1 rate point
///
/// # Examples
/// ```
/// use pricer_models::analytical::GreeksResult;
///
/// let zero = GreeksResult::<f64>::zero();
/// assert!(zero.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreeksResult<T: Float> {
    /// Fair value, never negative
    pub price: T,
    /// ∂V/∂S
    pub delta: T,
    /// ∂²V/∂S²
    pub gamma: T,
    /// ∂V/∂t per calendar day
    pub theta: T,
    /// ∂V/∂σ per volatility point
    pub vega: T,
    /// ∂V/∂r per rate point
    pub rho: T,
}

impl<T: Float> GreeksResult<T> {
    /// All-zero result used for expired or volatility-less contracts.
    pub fn zero() -> Self {
        let zero = T::zero();
        Self {
            price: zero,
            delta: zero,
            gamma: zero,
            theta: zero,
            vega: zero,
            rho: zero,
        }
    }

    /// Returns true if every field is exactly zero.
    pub fn is_zero(&self) -> bool {
        let zero = T::zero();
        [
            self.price, self.delta, self.gamma, self.theta, self.vega, self.rho,
        ]
        .iter()
        .all(|&v| v == zero)
    }

    /// Display rounding used in option chain tables.
    ///
    /// Price, delta, theta, vega and rho are rounded to 4 decimals and
    /// gamma to 6 decimals.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::GreeksResult;
    ///
    /// let greeks = GreeksResult {
    ///     price: 2.554_652_5_f64,
    ///     delta: 0.545_954_569,
    ///     gamma: 0.068_653_618,
    ///     theta: -0.046_173_07,
    ///     vega: 0.114_376_93,
    ///     rho: 0.043_349_99,
    /// };
    /// let rounded = greeks.rounded();
    /// assert_eq!(rounded.delta, 0.546);
    /// assert_eq!(rounded.gamma, 0.068654);
    /// assert_eq!(rounded.theta, -0.0462);
    /// ```
    pub fn rounded(&self) -> Self {
        Self {
            price: round_to(self.price, 4),
            delta: round_to(self.delta, 4),
            gamma: round_to(self.gamma, 6),
            theta: round_to(self.theta, 4),
            vega: round_to(self.vega, 4),
            rho: round_to(self.rho, 4),
        }
    }
}

/// Rounds to a fixed number of decimals (half away from zero).
///
/// # Examples
/// ```
/// use pricer_models::analytical::black_scholes::round_to;
///
/// assert_eq!(round_to(0.123_456_f64, 4), 0.1235);
/// assert_eq!(round_to(-1.000_04_f64, 4), -1.0);
/// ```
#[inline]
pub fn round_to<T: Float>(value: T, decimals: i32) -> T {
    let scale = T::from(10.0).unwrap().powi(decimals);
    (value * scale).round() / scale
}

/// Computes the Black-Scholes price and Greeks of a European option.
///
/// Returns [`GreeksResult::zero`] when `T <= 0` or `σ <= 0`; otherwise:
///
/// | | Call | Put |
/// |---|---|---|
/// | price | S·N(d₁) − K·e^(−rT)·N(d₂) | K·e^(−rT)·N(−d₂) − S·N(−d₁) |
/// | delta | N(d₁) | N(d₁) − 1 |
/// | theta | (−S·φ(d₁)·σ/(2√T) − r·K·e^(−rT)·N(d₂)) / 365 | (−S·φ(d₁)·σ/(2√T) + r·K·e^(−rT)·N(−d₂)) / 365 |
/// | rho | K·T·e^(−rT)·N(d₂) / 100 | −K·T·e^(−rT)·N(−d₂) / 100 |
///
/// with gamma = φ(d₁)/(S·σ·√T) and vega = S·φ(d₁)·√T / 100 for both sides.
/// The price is floored at zero.
///
/// # Examples
/// ```
/// use pricer_models::analytical::price_and_greeks;
/// use pricer_models::instruments::{MarketParameters, OptionSide};
///
/// let call = MarketParameters::new(100.0_f64, 100.0, 1.0, 0.05, 0.2, OptionSide::Call);
/// let put = call.with_side(OptionSide::Put);
///
/// let c = price_and_greeks(&call);
/// let p = price_and_greeks(&put);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = c.price - p.price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
pub fn price_and_greeks<T: Float>(params: &MarketParameters<T>) -> GreeksResult<T> {
    if params.is_degenerate() {
        return GreeksResult::zero();
    }

    let zero = T::zero();
    let two = T::from(2.0).unwrap();
    let days_per_year = T::from(DAYS_PER_YEAR).unwrap();
    let percent = T::from(PERCENT).unwrap();

    let MarketParameters {
        spot,
        strike,
        expiry,
        rate,
        volatility,
        side,
    } = *params;

    let sqrt_t = expiry.sqrt();
    let d1 = params.d1();
    let d2 = d1 - volatility * sqrt_t;
    let pdf_d1 = norm_pdf(d1);
    let discounted_strike = strike * params.discount_factor();

    // Common to both sides: -(S·φ(d₁)·σ)/(2√T)
    let decay = -spot * pdf_d1 * volatility / (two * sqrt_t);

    let (price, delta, theta, rho) = match side {
        OptionSide::Call => {
            let n_d1 = norm_cdf(d1);
            let n_d2 = norm_cdf(d2);
            (
                spot * n_d1 - discounted_strike * n_d2,
                n_d1,
                decay - rate * discounted_strike * n_d2,
                expiry * discounted_strike * n_d2,
            )
        }
        OptionSide::Put => {
            let n_minus_d1 = norm_cdf(-d1);
            let n_minus_d2 = norm_cdf(-d2);
            (
                discounted_strike * n_minus_d2 - spot * n_minus_d1,
                norm_cdf(d1) - T::one(),
                decay + rate * discounted_strike * n_minus_d2,
                -expiry * discounted_strike * n_minus_d2,
            )
        }
    };

    GreeksResult {
        price: price.max(zero),
        delta,
        gamma: pdf_d1 / (spot * volatility * sqrt_t),
        theta: theta / days_per_year,
        vega: spot * pdf_d1 * sqrt_t / percent,
        rho: rho / percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(side: OptionSide) -> MarketParameters<f64> {
        MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, side)
    }

    // ==========================================================
    // Reference values (S=100, K=100, T=1, r=5%, σ=20%)
    // ==========================================================

    #[test]
    fn test_call_reference_values() {
        let g = price_and_greeks(&params(OptionSide::Call));
        assert_relative_eq!(g.price, 10.450583572185565, epsilon = 1e-10);
        assert_relative_eq!(g.delta, 0.636830651175619, epsilon = 1e-12);
        assert_relative_eq!(g.gamma, 0.018762017345846895, epsilon = 1e-12);
        assert_relative_eq!(g.theta, -0.01757267820941972, epsilon = 1e-12);
        assert_relative_eq!(g.vega, 0.3752403469169379, epsilon = 1e-12);
        assert_relative_eq!(g.rho, 0.5323248154537634, epsilon = 1e-12);
    }

    #[test]
    fn test_put_reference_values() {
        let g = price_and_greeks(&params(OptionSide::Put));
        assert_relative_eq!(g.price, 5.573526022256971, epsilon = 1e-10);
        assert_relative_eq!(g.delta, -0.363169348824381, epsilon = 1e-12);
        assert_relative_eq!(g.theta, -0.0045421381477661, epsilon = 1e-12);
        assert_relative_eq!(g.rho, -0.4189046090469506, epsilon = 1e-12);
    }

    #[test]
    fn test_one_month_atm_scenario() {
        // S=100, K=100, T=0.0833, r=6%, σ=20%
        let call = MarketParameters::new(100.0, 100.0, 0.0833, 0.06, 0.2, OptionSide::Call);
        let g = price_and_greeks(&call);
        assert_relative_eq!(g.price, 2.5546525393202373, epsilon = 1e-9);
        assert_relative_eq!(g.delta, 0.545954569484009, epsilon = 1e-10);
        assert_relative_eq!(g.gamma, 0.06865361828770725, epsilon = 1e-10);
        assert_relative_eq!(g.vega, 0.11437692806732029, epsilon = 1e-10);
    }

    // ==========================================================
    // Side symmetry
    // ==========================================================

    #[test]
    fn test_gamma_and_vega_shared_between_sides() {
        let call = price_and_greeks(&params(OptionSide::Call));
        let put = price_and_greeks(&params(OptionSide::Put));
        assert_eq!(call.gamma, put.gamma);
        assert_eq!(call.vega, put.vega);
    }

    #[test]
    fn test_delta_difference_is_one() {
        let call = price_and_greeks(&params(OptionSide::Call));
        let put = price_and_greeks(&params(OptionSide::Put));
        assert_relative_eq!(call.delta - put.delta, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_put_call_parity() {
        let call = price_and_greeks(&params(OptionSide::Call));
        let put = price_and_greeks(&params(OptionSide::Put));
        let forward_value = 100.0 - 100.0 * (-0.05_f64).exp();
        assert_relative_eq!(call.price - put.price, forward_value, epsilon = 1e-10);
    }

    // ==========================================================
    // Degenerate input
    // ==========================================================

    #[test]
    fn test_zero_expiry_is_all_zero() {
        for side in OptionSide::ALL {
            let expired = MarketParameters { expiry: 0.0, ..params(side) };
            assert_eq!(price_and_greeks(&expired), GreeksResult::zero());
        }
    }

    #[test]
    fn test_negative_expiry_is_all_zero() {
        let expired = MarketParameters { expiry: -0.5, ..params(OptionSide::Call) };
        assert!(price_and_greeks(&expired).is_zero());
    }

    #[test]
    fn test_zero_volatility_is_all_zero() {
        for side in OptionSide::ALL {
            assert!(price_and_greeks(&params(side).with_volatility(0.0)).is_zero());
        }
    }

    #[test]
    fn test_deep_otm_price_floored_at_zero() {
        let deep_otm = MarketParameters::new(100.0, 1_000.0, 0.01, 0.06, 0.05, OptionSide::Call);
        let g = price_and_greeks(&deep_otm);
        assert!(g.price >= 0.0);
        assert!(g.price < 1e-12);
    }

    // ==========================================================
    // Sensitivities against finite differences
    // ==========================================================

    #[test]
    fn test_vega_matches_finite_difference() {
        let base = params(OptionSide::Call);
        let h = 1e-6;
        let up = price_and_greeks(&base.with_volatility(0.2 + h)).price;
        let down = price_and_greeks(&base.with_volatility(0.2 - h)).price;
        let numerical = (up - down) / (2.0 * h) / PERCENT;
        assert_relative_eq!(price_and_greeks(&base).vega, numerical, epsilon = 1e-7);
    }

    #[test]
    fn test_delta_and_gamma_match_finite_difference() {
        let h = 1e-3;
        for side in OptionSide::ALL {
            let base = params(side);
            let up = price_and_greeks(&MarketParameters { spot: 100.0 + h, ..base });
            let down = price_and_greeks(&MarketParameters { spot: 100.0 - h, ..base });
            let g = price_and_greeks(&base);
            assert_relative_eq!(g.delta, (up.price - down.price) / (2.0 * h), epsilon = 1e-7);
            assert_relative_eq!(g.gamma, (up.delta - down.delta) / (2.0 * h), epsilon = 1e-7);
        }
    }

    #[test]
    fn test_rho_matches_finite_difference() {
        let h = 1e-6;
        for side in OptionSide::ALL {
            let base = params(side);
            let up = price_and_greeks(&MarketParameters { rate: 0.05 + h, ..base }).price;
            let down = price_and_greeks(&MarketParameters { rate: 0.05 - h, ..base }).price;
            let numerical = (up - down) / (2.0 * h) / PERCENT;
            assert_relative_eq!(price_and_greeks(&base).rho, numerical, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_theta_matches_time_decay() {
        // theta = -∂V/∂T / 365
        let h = 1e-6;
        for side in OptionSide::ALL {
            let base = params(side);
            let longer = price_and_greeks(&MarketParameters { expiry: 1.0 + h, ..base }).price;
            let shorter = price_and_greeks(&MarketParameters { expiry: 1.0 - h, ..base }).price;
            let numerical = -(longer - shorter) / (2.0 * h) / DAYS_PER_YEAR;
            assert_relative_eq!(price_and_greeks(&base).theta, numerical, epsilon = 1e-8);
        }
    }

    // ==========================================================
    // Rounding
    // ==========================================================

    #[test]
    fn test_rounded_precision() {
        let g = price_and_greeks(&params(OptionSide::Call)).rounded();
        assert_eq!(g.price, 10.4506);
        assert_eq!(g.delta, 0.6368);
        assert_eq!(g.gamma, 0.018762);
        assert_eq!(g.theta, -0.0176);
        assert_eq!(g.vega, 0.3752);
        assert_eq!(g.rho, 0.5323);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456789_f64, 6), 1.234568);
        assert_eq!(round_to(-0.00005_f64, 4), -0.0001);
        assert_eq!(round_to(0.0_f64, 4), 0.0);
    }

    #[test]
    fn test_f32_pricing() {
        let call = MarketParameters::new(100.0_f32, 100.0, 1.0, 0.05, 0.2, OptionSide::Call);
        let g = price_and_greeks(&call);
        assert!((g.price - 10.4506).abs() < 1e-3);
    }
}
