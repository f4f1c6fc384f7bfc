//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command-line flags.

use pricer_chain::{ChainConfig, VolatilityMode};
use pricer_chain::config::DEFAULT_FIXED_VOLATILITY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable overriding the risk-free rate.
pub const ENV_RISK_FREE_RATE: &str = "OPTCHAIN_RISK_FREE_RATE";
/// Environment variable selecting the volatility mode (`market` or `fixed`).
pub const ENV_VOL_MODE: &str = "OPTCHAIN_VOL_MODE";
/// Environment variable overriding the fixed volatility.
pub const ENV_FIXED_VOL: &str = "OPTCHAIN_FIXED_VOL";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "OPTCHAIN_LOG_LEVEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid volatility mode: {0}. Must be one of: market, fixed")]
    InvalidVolatilityMode(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidNumber { name: String, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Parses a volatility mode name; `fixed` uses `fixed_vol` or the 20% default.
pub fn parse_volatility_mode(
    mode: &str,
    fixed_vol: Option<f64>,
) -> Result<VolatilityMode, ConfigError> {
    match mode.trim().to_lowercase().as_str() {
        "market" | "market_implied" | "implied" => Ok(VolatilityMode::MarketImplied),
        "fixed" | "assumed" => Ok(VolatilityMode::Fixed(
            fixed_vol.unwrap_or(DEFAULT_FIXED_VOLATILITY),
        )),
        _ => Err(ConfigError::InvalidVolatilityMode(mode.to_string())),
    }
}

fn parse_number(name: &str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            name: name.to_string(),
            value: value.to_string(),
        })
}

/// Effective CLI configuration.
///
/// ```toml
/// log_level = "info"
///
/// [chain]
/// risk_free_rate = 0.065
/// volatility_mode = "market_implied"   # or { fixed = 0.2 }
///
/// [chain.solver]
/// initial_guess = 0.2
/// min_volatility = 0.001
/// solver = { tolerance = 1e-6, max_iterations = 100 }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Chain aggregation and solver settings
    pub chain: ChainConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from environment variables read through `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rate) = lookup(ENV_RISK_FREE_RATE) {
            self.chain.risk_free_rate = parse_number(ENV_RISK_FREE_RATE, &rate)?;
        }

        let fixed_vol = lookup(ENV_FIXED_VOL)
            .map(|v| parse_number(ENV_FIXED_VOL, &v))
            .transpose()?;

        if let Some(mode) = lookup(ENV_VOL_MODE) {
            self.chain.volatility_mode = parse_volatility_mode(&mode, fixed_vol)?;
        } else if let (Some(sigma), VolatilityMode::Fixed(_)) =
            (fixed_vol, self.chain.volatility_mode)
        {
            self.chain.volatility_mode = VolatilityMode::Fixed(sigma);
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }

        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(rate) = cli.risk_free_rate {
            self.chain.risk_free_rate = rate;
        }
        if let Some(sigma) = cli.fixed_vol {
            self.chain.volatility_mode = VolatilityMode::Fixed(sigma);
        }
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        } else if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chain
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Switch to debug logging when no level is given
    pub verbose: bool,
    /// Risk-free rate override
    pub risk_free_rate: Option<f64>,
    /// Price every leg at this volatility instead of solving IV
    pub fixed_vol: Option<f64>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<AppConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup.
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    config.apply_env_with(lookup)?;
    config.merge_with_cli(cli)?;

    // Final validation
    config.validate()?;

    Ok(config)
}
