//! Chain aggregation settings.

use pricer_models::implied::IvSolverConfig;
use serde::{Deserialize, Serialize};

use crate::{ChainError, ParallelConfig};

/// Default annualised risk-free rate.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.06;

/// Default volatility of [`VolatilityMode::Fixed`].
pub const DEFAULT_FIXED_VOLATILITY: f64 = 0.2;

/// Where each leg's pricing volatility comes from.
///
/// Serialises as `"market_implied"` or `{ fixed = 0.2 }` in TOML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityMode {
    /// Solve implied volatility from each leg's last traded price.
    #[default]
    MarketImplied,
    /// Price every leg at a constant volatility and report it as the IV.
    Fixed(f64),
}

impl VolatilityMode {
    /// Fixed mode at the default 20% volatility.
    pub fn assumed() -> Self {
        VolatilityMode::Fixed(DEFAULT_FIXED_VOLATILITY)
    }
}

/// Settings of a [`ChainAggregator`](crate::ChainAggregator).
///
/// # Examples
/// ```
/// use pricer_chain::{ChainConfig, VolatilityMode};
///
/// let config = ChainConfig::default();
/// assert_eq!(config.risk_free_rate, 0.06);
/// assert_eq!(config.volatility_mode, VolatilityMode::MarketImplied);
/// assert!(config.validate().is_ok());
///
/// let fixed = ChainConfig { volatility_mode: VolatilityMode::Fixed(-0.1), ..config };
/// assert!(fixed.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Continuously-compounded annual rate used for every leg.
    pub risk_free_rate: f64,
    /// Source of pricing volatility.
    pub volatility_mode: VolatilityMode,
    /// Implied volatility search settings.
    pub solver: IvSolverConfig<f64>,
    /// Row-level parallelism.
    pub parallel: ParallelConfig,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            volatility_mode: VolatilityMode::default(),
            solver: IvSolverConfig::default(),
            parallel: ParallelConfig::default(),
        }
    }
}

impl ChainConfig {
    /// Checks that the settings can produce finite analytics.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::InvalidConfig` for a non-finite rate, a
    /// non-positive fixed volatility or an unusable solver setup.
    pub fn validate(&self) -> Result<(), ChainError> {
        if !self.risk_free_rate.is_finite() {
            return Err(ChainError::InvalidConfig(format!(
                "risk_free_rate must be finite, got {}",
                self.risk_free_rate
            )));
        }
        if let VolatilityMode::Fixed(sigma) = self.volatility_mode {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(ChainError::InvalidConfig(format!(
                    "fixed volatility must be positive, got {sigma}"
                )));
            }
        }
        if !self.solver.is_valid() {
            return Err(ChainError::InvalidConfig(format!(
                "solver needs positive tolerance, iterations and floor: {:?}",
                self.solver
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_non_finite_rate() {
        let config = ChainConfig {
            risk_free_rate: f64::NAN,
            ..ChainConfig::default()
        };
        assert!(matches!(config.validate(), Err(ChainError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let config = ChainConfig {
            solver: IvSolverConfig::default().with_max_iterations(0),
            ..ChainConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_assumed_mode() {
        assert_eq!(VolatilityMode::assumed(), VolatilityMode::Fixed(0.2));
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(
            serde_json::to_string(&VolatilityMode::MarketImplied).unwrap(),
            "\"market_implied\""
        );
        assert_eq!(
            serde_json::to_string(&VolatilityMode::Fixed(0.25)).unwrap(),
            "{\"fixed\":0.25}"
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ChainConfig = serde_json::from_str(r#"{"risk_free_rate": 0.07}"#).unwrap();
        assert_eq!(config.risk_free_rate, 0.07);
        assert_eq!(config.solver, IvSolverConfig::default());
        assert_eq!(config.parallel, ParallelConfig::default());
    }
}
