//! optchain - Option Chain Analytics from the Command Line
//!
//! # Commands
//!
//! - `optchain greeks` - Black-Scholes price and Greeks of one option
//! - `optchain iv` - Implied volatility of one option premium
//! - `optchain chain --input <file|dir>` - Nearest-expiry chain report with IV, Greeks and PCR
//! - `optchain check` - Validate and print the effective configuration
//!
//! Configuration is layered: CLI flags override `OPTCHAIN_*` environment
//! variables, which override the TOML file, which overrides built-in
//! defaults. Logs go to stderr so stdout carries only the report.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pricer_models::instruments::{MarketParameters, OptionSide};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use config::{build_config, CliArgs};
use output::OutputFormat;

/// Option chain analytics: Greeks, implied volatility and chain reports
#[derive(Parser, Debug)]
#[command(name = "optchain")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE", env = "OPTCHAIN_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "OPTCHAIN_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price one European option and report its Greeks
    Greeks {
        /// Underlying price
        #[arg(long)]
        spot: f64,

        /// Strike price
        #[arg(long)]
        strike: f64,

        /// Time to expiry in years
        #[arg(long)]
        expiry: f64,

        /// Annual volatility (0.2 = 20%)
        #[arg(long)]
        vol: f64,

        /// Risk-free rate (defaults to the configured rate)
        #[arg(long)]
        rate: Option<f64>,

        /// Option side (call, put, CE, PE)
        #[arg(long, default_value = "call")]
        side: OptionSide,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Solve the implied volatility of one option premium
    Iv {
        /// Observed option premium
        #[arg(long)]
        price: f64,

        /// Underlying price
        #[arg(long)]
        spot: f64,

        /// Strike price
        #[arg(long)]
        strike: f64,

        /// Time to expiry in years
        #[arg(long)]
        expiry: f64,

        /// Risk-free rate (defaults to the configured rate)
        #[arg(long)]
        rate: Option<f64>,

        /// Option side (call, put, CE, PE)
        #[arg(long, default_value = "call")]
        side: OptionSide,

        /// Fail when the search does not converge
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Build the nearest-expiry option chain report from a snapshot
    Chain {
        /// Snapshot JSON file, or a directory holding `<SYMBOL>.json`
        #[arg(short, long)]
        input: PathBuf,

        /// Underlying symbol
        #[arg(short, long, default_value = "NIFTY")]
        symbol: String,

        /// Risk-free rate override
        #[arg(long)]
        rate: Option<f64>,

        /// Price every leg at this volatility instead of solving IV
        #[arg(long)]
        fixed_vol: Option<f64>,

        /// Valuation time (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS, default now)
        #[arg(long)]
        as_of: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Validate and print the effective configuration
    Check,
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        let (risk_free_rate, fixed_vol) = match &cli.command {
            Commands::Greeks { rate, .. } | Commands::Iv { rate, .. } => (*rate, None),
            Commands::Chain {
                rate, fixed_vol, ..
            } => (*rate, *fixed_vol),
            Commands::Check => (None, None),
        };
        CliArgs {
            config_file: cli.config.clone(),
            log_level: cli.log_level.clone(),
            verbose: cli.verbose,
            risk_free_rate,
            fixed_vol,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliArgs::from(&cli)).context("Failed to load configuration")?;

    init_tracing(config.log_level.as_filter_str());
    tracing::debug!(?config, "Configuration loaded");

    let stdout = io::stdout().lock();
    let rate = config.chain.risk_free_rate;

    match cli.command {
        Commands::Greeks {
            spot,
            strike,
            expiry,
            vol,
            side,
            format,
            ..
        } => {
            let params = MarketParameters::new(spot, strike, expiry, rate, vol, side);
            commands::greeks::run(stdout, params, format)?;
        }
        Commands::Iv {
            price,
            spot,
            strike,
            expiry,
            side,
            strict,
            format,
            ..
        } => {
            let request = commands::iv::IvRequest {
                market_price: price,
                spot,
                strike,
                expiry,
                rate,
                side,
                strict,
            };
            commands::iv::run(stdout, request, config.chain.solver, format)?;
        }
        Commands::Chain {
            input,
            symbol,
            as_of,
            format,
            ..
        } => {
            let as_of = commands::chain::parse_as_of(as_of.as_deref())?;
            commands::chain::run(stdout, &input, &symbol, as_of, &config.chain, format)?;
        }
        Commands::Check => commands::check::run(stdout, &config)?,
    }

    Ok(())
}
