//! Check command implementation
//!
//! Validates the effective configuration and prints it as TOML.

use std::io::Write;

use tracing::info;

use crate::config::AppConfig;
use crate::{CliError, Result};

/// Run the check command
pub fn run<W: Write>(mut out: W, config: &AppConfig) -> Result<()> {
    config.validate()?;

    let rendered = toml::to_string_pretty(config)
        .map_err(|e| CliError::InvalidArgument(format!("Failed to render configuration: {e}")))?;

    info!(version = env!("CARGO_PKG_VERSION"), "Configuration is valid");
    writeln!(out, "# optchain {} effective configuration", env!("CARGO_PKG_VERSION"))?;
    write!(out, "{rendered}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_chain::VolatilityMode;

    #[test]
    fn test_prints_parseable_config() {
        let mut buffer = Vec::new();
        run(&mut buffer, &AppConfig::default()).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("# optchain "));
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
        assert_eq!(parsed.chain.volatility_mode, VolatilityMode::MarketImplied);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.chain.risk_free_rate = f64::INFINITY;
        assert!(matches!(
            run(std::io::sink(), &config),
            Err(CliError::Config(_))
        ));
    }
}
