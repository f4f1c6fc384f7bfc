//! Market parameters of a single European option.

use pricer_core::traits::Float;

use super::OptionSide;

/// Inputs of the Black-Scholes formula for one contract.
///
/// A plain value type: no validation happens at construction. Degenerate
/// combinations (expired contract, zero volatility) are legal and are
/// priced as all-zero results by
/// [`price_and_greeks`](crate::analytical::price_and_greeks).
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
/// ```
/// use pricer_models::instruments::{MarketParameters, OptionSide};
///
/// let params = MarketParameters::new(100.0_f64, 100.0, 0.5, 0.06, 0.2, OptionSide::Call);
/// assert!(!params.is_degenerate());
///
/// let expired = MarketParameters { expiry: 0.0, ..params };
/// assert!(expired.is_degenerate());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketParameters<T: Float> {
    /// Spot price of the underlying (S)
    pub spot: T,
    /// Strike price (K)
    pub strike: T,
    /// Time to expiry in years (T)
    pub expiry: T,
    /// Annualised continuously-compounded risk-free rate (r)
    pub rate: T,
    /// Annualised volatility (σ)
    pub volatility: T,
    /// Call or put
    pub side: OptionSide,
}

impl<T: Float> MarketParameters<T> {
    /// Creates market parameters from their components.
    pub fn new(spot: T, strike: T, expiry: T, rate: T, volatility: T, side: OptionSide) -> Self {
        Self {
            spot,
            strike,
            expiry,
            rate,
            volatility,
            side,
        }
    }

    /// Returns a copy priced at a different volatility.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::{MarketParameters, OptionSide};
    ///
    /// let params = MarketParameters::new(100.0_f64, 100.0, 0.5, 0.06, 0.2, OptionSide::Put);
    /// let bumped = params.with_volatility(0.25);
    /// assert_eq!(bumped.volatility, 0.25);
    /// assert_eq!(bumped.strike, params.strike);
    /// ```
    #[inline]
    pub fn with_volatility(self, volatility: T) -> Self {
        Self { volatility, ..self }
    }

    /// Returns a copy for the opposite side.
    #[inline]
    pub fn with_side(self, side: OptionSide) -> Self {
        Self { side, ..self }
    }

    /// True when the contract has no time value or no volatility
    /// (`T <= 0` or `σ <= 0`).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.expiry <= T::zero() || self.volatility <= T::zero()
    }

    /// Discount factor e^(−rT).
    #[inline]
    pub fn discount_factor(&self) -> T {
        (-self.rate * self.expiry).exp()
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// Only meaningful for non-degenerate parameters.
    #[inline]
    pub fn d1(&self) -> T {
        let half = T::from(0.5).unwrap();
        let vol_sqrt_t = self.volatility * self.expiry.sqrt();
        let log_moneyness = (self.spot / self.strike).ln();
        let drift = (self.rate + half * self.volatility * self.volatility) * self.expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// d₂ = d₁ − σ√T
    #[inline]
    pub fn d2(&self) -> T {
        self.d1() - self.volatility * self.expiry.sqrt()
    }
}
