//! Implied volatility command implementation

use std::io::Write;

use pricer_models::implied::{ImpliedVolSolver, IvSolverConfig, IvTermination};
use pricer_models::instruments::{MarketParameters, OptionSide};
use serde::Serialize;
use tracing::{info, warn};

use crate::output::{key_value_table, write_csv, write_json, OutputFormat};
use crate::{CliError, Result};

/// Implied volatility of one premium with solver diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IvQuote {
    pub side: OptionSide,
    pub market_price: f64,
    pub spot: f64,
    pub strike: f64,
    pub expiry: f64,
    pub rate: f64,
    pub implied_volatility: f64,
    pub iterations: usize,
    pub residual: f64,
    pub termination: IvTermination,
}

/// Inputs of the iv command.
#[derive(Debug, Clone, Copy)]
pub struct IvRequest {
    pub market_price: f64,
    pub spot: f64,
    pub strike: f64,
    pub expiry: f64,
    pub rate: f64,
    pub side: OptionSide,
    /// Fail instead of reporting a non-converged estimate
    pub strict: bool,
}

/// Run the iv command
pub fn run<W: Write>(
    mut out: W,
    request: IvRequest,
    solver: IvSolverConfig<f64>,
    format: OutputFormat,
) -> Result<IvQuote> {
    if request.spot <= 0.0 || request.strike <= 0.0 {
        return Err(CliError::InvalidArgument(format!(
            "spot and strike must be positive, got {} and {}",
            request.spot, request.strike
        )));
    }
    if request.market_price < 0.0 {
        return Err(CliError::InvalidArgument(format!(
            "market price must not be negative, got {}",
            request.market_price
        )));
    }

    let params = MarketParameters::new(
        request.spot,
        request.strike,
        request.expiry,
        request.rate,
        solver.initial_guess,
        request.side,
    );
    let solution = ImpliedVolSolver::new(solver).solve(request.market_price, &params);

    if request.strict {
        solution.into_result()?;
    } else if !solution.is_converged() && solution.termination != IvTermination::NoTimeValue {
        warn!(
            termination = ?solution.termination,
            iterations = solution.iterations,
            residual = solution.residual,
            "Implied volatility did not converge; reporting last iterate"
        );
    }
    info!(iv = solution.volatility, iterations = solution.iterations, "Solved implied volatility");

    let quote = IvQuote {
        side: request.side,
        market_price: request.market_price,
        spot: request.spot,
        strike: request.strike,
        expiry: request.expiry,
        rate: request.rate,
        implied_volatility: solution.volatility,
        iterations: solution.iterations,
        residual: solution.residual,
        termination: solution.termination,
    };

    match format {
        OutputFormat::Json => write_json(out, &quote)?,
        OutputFormat::Csv => write_csv(out, [quote])?,
        OutputFormat::Table => write!(
            out,
            "{}",
            key_value_table(
                &format!("{} {} @ {}", quote.side, quote.strike, quote.spot),
                &[
                    ("premium", format!("{}", quote.market_price)),
                    ("iv", format!("{:.6}", quote.implied_volatility)),
                    ("iterations", quote.iterations.to_string()),
                    ("residual", format!("{:.3e}", quote.residual)),
                    ("termination", format!("{:?}", quote.termination)),
                ],
            )
        )?,
    }
    Ok(quote)
}
