//! Greeks command implementation
//!
//! Prices one European option and reports its Greeks.

use std::io::Write;

use pricer_models::analytical::price_and_greeks;
use pricer_models::instruments::{MarketParameters, OptionSide};
use serde::Serialize;
use tracing::info;

use crate::output::{key_value_table, write_csv, write_json, OutputFormat};
use crate::{CliError, Result};

/// Contract inputs and its price with Greeks, as one flat record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GreeksQuote {
    pub side: OptionSide,
    pub spot: f64,
    pub strike: f64,
    pub expiry: f64,
    pub rate: f64,
    pub volatility: f64,
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

impl GreeksQuote {
    /// Prices `params`.
    pub fn compute(params: &MarketParameters<f64>) -> Self {
        let greeks = price_and_greeks(params);
        Self {
            side: params.side,
            spot: params.spot,
            strike: params.strike,
            expiry: params.expiry,
            rate: params.rate,
            volatility: params.volatility,
            price: greeks.price,
            delta: greeks.delta,
            gamma: greeks.gamma,
            theta: greeks.theta,
            vega: greeks.vega,
            rho: greeks.rho,
        }
    }

    fn table(&self) -> String {
        key_value_table(
            &format!("{} {} @ {}", self.side, self.strike, self.spot),
            &[
                ("price", format!("{:.4}", self.price)),
                ("delta", format!("{:.4}", self.delta)),
                ("gamma", format!("{:.6}", self.gamma)),
                ("theta/day", format!("{:.4}", self.theta)),
                ("vega/pt", format!("{:.4}", self.vega)),
                ("rho/pt", format!("{:.4}", self.rho)),
            ],
        )
    }
}

/// Run the greeks command
pub fn run<W: Write>(
    mut out: W,
    params: MarketParameters<f64>,
    format: OutputFormat,
) -> Result<GreeksQuote> {
    if params.spot <= 0.0 || params.strike <= 0.0 {
        return Err(CliError::InvalidArgument(format!(
            "spot and strike must be positive, got {} and {}",
            params.spot, params.strike
        )));
    }

    let quote = GreeksQuote::compute(&params);
    info!(side = %quote.side, price = quote.price, "Priced option");

    match format {
        OutputFormat::Json => write_json(out, &quote)?,
        OutputFormat::Csv => write_csv(out, [quote])?,
        OutputFormat::Table => write!(out, "{}", quote.table())?,
    }
    Ok(quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> MarketParameters<f64> {
        MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionSide::Call)
    }

    #[test]
    fn test_reference_call() {
        let quote = run(std::io::sink(), params(), OutputFormat::Json).unwrap();
        assert_relative_eq!(quote.price, 10.450_583_572_185_565, epsilon = 1e-10);
        assert_relative_eq!(quote.delta, 0.636_830_651_175_619, epsilon = 1e-10);
    }

    #[test]
    fn test_csv_has_header_and_one_row() {
        let mut buffer = Vec::new();
        run(&mut buffer, params(), OutputFormat::Csv).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("side,spot,strike,expiry,rate,volatility,price"));
        assert!(lines[1].starts_with("call,100.0,100.0,1.0,0.05,0.2,"));
    }

    #[test]
    fn test_table_output() {
        let mut buffer = Vec::new();
        run(&mut buffer, params(), OutputFormat::Table).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("call 100 @ 100"));
        assert!(text.contains("price      10.4506"));
    }

    #[test]
    fn test_expired_contract_is_all_zero() {
        let expired = MarketParameters {
            expiry: 0.0,
            ..params()
        };
        let quote = run(std::io::sink(), expired, OutputFormat::Json).unwrap();
        assert_eq!(quote.price, 0.0);
        assert_eq!(quote.delta, 0.0);
    }

    #[test]
    fn test_rejects_non_positive_spot() {
        let bad = MarketParameters {
            spot: 0.0,
            ..params()
        };
        assert!(matches!(
            run(std::io::sink(), bad, OutputFormat::Json),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
