//! Per-leg analytics: implied volatility and rounded Greeks.

use adapter_feeds::LegQuote;
use pricer_models::analytical::black_scholes::round_to;
use pricer_models::analytical::{price_and_greeks, GreeksResult};
use pricer_models::implied::ImpliedVolSolver;
use pricer_models::instruments::{MarketParameters, OptionSide};
use serde::Serialize;
use tracing::debug;

use crate::{ChainConfig, VolatilityMode};

/// Decimals of the reported implied volatility.
const IV_DECIMALS: i32 = 4;

/// Implied volatility and Greeks of one leg, rounded for display.
///
/// All zeros when the leg was not priced (no trade, or no usable
/// underlying, strike or expiry).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LegAnalytics {
    /// Delta, 4 decimals
    pub delta: f64,
    /// Gamma, 6 decimals
    pub gamma: f64,
    /// Theta per calendar day, 4 decimals
    pub theta: f64,
    /// Vega per volatility point, 4 decimals
    pub vega: f64,
    /// Rho per rate point, 4 decimals
    pub rho: f64,
    /// Volatility used for the Greeks, 4 decimals
    pub iv: f64,
}

impl LegAnalytics {
    fn new(greeks: GreeksResult<f64>, iv: f64) -> Self {
        let greeks = greeks.rounded();
        Self {
            delta: greeks.delta,
            gamma: greeks.gamma,
            theta: greeks.theta,
            vega: greeks.vega,
            rho: greeks.rho,
            iv: round_to(iv, IV_DECIMALS),
        }
    }
}

/// Quote and analytics of one leg in a chain row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LegSummary {
    /// Open interest
    pub oi: f64,
    /// Change in open interest
    pub change_oi: f64,
    /// Last traded price
    pub ltp: f64,
    /// Traded volume
    pub volume: f64,
    /// Analytics derived from `ltp`
    pub analytics: LegAnalytics,
}

impl LegSummary {
    /// Flat values in column order: quote fields, then Greeks, then IV.
    pub(crate) fn columns(&self) -> [f64; 10] {
        let a = &self.analytics;
        [
            self.oi,
            self.change_oi,
            self.ltp,
            self.volume,
            a.delta,
            a.gamma,
            a.theta,
            a.vega,
            a.rho,
            a.iv,
        ]
    }
}

/// Underlying level, year fraction and rate shared by one expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpiryContext {
    /// Underlying level
    pub underlying: f64,
    /// Time to expiry in years
    pub expiry_years: f64,
    /// Risk-free rate
    pub rate: f64,
}

/// Prices legs of a single expiry under one configuration.
#[derive(Debug, Clone)]
pub struct LegPricer {
    context: ExpiryContext,
    mode: VolatilityMode,
    solver: ImpliedVolSolver<f64>,
}

impl LegPricer {
    /// Creates a pricer for the legs of one expiry.
    pub fn new(context: ExpiryContext, config: &ChainConfig) -> Self {
        Self {
            context,
            mode: config.volatility_mode,
            solver: ImpliedVolSolver::new(config.solver),
        }
    }

    /// Returns the shared expiry context.
    pub fn context(&self) -> &ExpiryContext {
        &self.context
    }

    /// Summarises one leg quote.
    ///
    /// # Examples
    /// ```
    /// use adapter_feeds::LegQuote;
    /// use pricer_chain::leg::{ExpiryContext, LegPricer};
    /// use pricer_chain::ChainConfig;
    /// use pricer_models::instruments::OptionSide;
    ///
    /// let context = ExpiryContext { underlying: 22000.0, expiry_years: 7.0 / 365.0, rate: 0.06 };
    /// let pricer = LegPricer::new(context, &ChainConfig::default());
    ///
    /// let untraded = LegQuote { open_interest: 500.0, ..LegQuote::default() };
    /// let leg = pricer.summarise(22000.0, OptionSide::Put, &untraded);
    /// assert_eq!(leg.oi, 500.0);
    /// assert_eq!(leg.analytics.iv, 0.0);
    /// assert_eq!(leg.analytics.delta, 0.0);
    /// ```
    pub fn summarise(&self, strike: f64, side: OptionSide, quote: &LegQuote) -> LegSummary {
        LegSummary {
            oi: quote.open_interest,
            change_oi: quote.change_in_open_interest,
            ltp: quote.last_price,
            volume: quote.total_traded_volume,
            analytics: self.analyse(strike, side, quote.last_price),
        }
    }

    fn analyse(&self, strike: f64, side: OptionSide, last_price: f64) -> LegAnalytics {
        let ExpiryContext {
            underlying,
            expiry_years,
            rate,
        } = self.context;

        let priceable = underlying > 0.0 && expiry_years > 0.0 && strike > 0.0 && last_price > 0.0;
        if !priceable {
            return LegAnalytics::default();
        }

        let params = MarketParameters::new(underlying, strike, expiry_years, rate, 0.0, side);

        match self.mode {
            VolatilityMode::Fixed(sigma) => {
                LegAnalytics::new(price_and_greeks(&params.with_volatility(sigma)), sigma)
            }
            VolatilityMode::MarketImplied => {
                let solution = self.solver.solve(last_price, &params);
                if !solution.is_converged() {
                    debug!(
                        strike,
                        side = %side,
                        iterations = solution.iterations,
                        residual = solution.residual,
                        termination = ?solution.termination,
                        "Implied volatility did not converge, using last iterate"
                    );
                }

                let iv = solution.volatility;
                let greeks = if iv > 0.0 {
                    price_and_greeks(&params.with_volatility(iv))
                } else {
                    GreeksResult::zero()
                };
                LegAnalytics::new(greeks, iv)
            }
        }
    }
}
