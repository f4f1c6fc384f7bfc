//! Chain command implementation
//!
//! Loads an option-chain snapshot from disk and renders the nearest-expiry
//! report. Failures are written in the `{"error": ...}` shape before the
//! command returns an error.

use std::io::Write;
use std::path::Path;

use adapter_feeds::JsonFileSource;
use chrono::{Local, NaiveDateTime};
use pricer_chain::{ChainAggregator, ChainConfig, ChainResponse};
use pricer_core::types::Date;
use tracing::{error, info};

use crate::output::{chain_table, write_csv, write_json, OutputFormat};
use crate::{CliError, Result};

/// Valuation time from `--as-of`: `YYYY-MM-DD` (midnight) or
/// `YYYY-MM-DDTHH:MM:SS`; the local clock when absent.
pub fn parse_as_of(as_of: Option<&str>) -> Result<NaiveDateTime> {
    match as_of {
        None => Ok(Local::now().naive_local()),
        Some(text) => match NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%dT%H:%M:%S") {
            Ok(timestamp) => Ok(timestamp),
            Err(_) => Ok(Date::parse(text)?.start_of_day()),
        },
    }
}

/// Run the chain command
pub fn run<W: Write>(
    mut out: W,
    input: &Path,
    symbol: &str,
    as_of: NaiveDateTime,
    config: &ChainConfig,
    format: OutputFormat,
) -> Result<ChainResponse> {
    if !input.exists() {
        return Err(CliError::FileNotFound(input.display().to_string()));
    }

    info!(input = %input.display(), symbol, %as_of, "Building option chain report");

    let source = JsonFileSource::new(input);
    let aggregator = ChainAggregator::new(config.clone());
    let response = ChainResponse::from(aggregator.build_from_source(&source, symbol, as_of));

    match &response {
        ChainResponse::Failure { error } => {
            error!(%error, "Option chain report failed");
            write_json(&mut out, &response)?;
            return Err(CliError::ChainFailed(error.clone()));
        }
        ChainResponse::Report(report) => match format {
            OutputFormat::Json => write_json(&mut out, &response)?,
            OutputFormat::Csv => write_csv(&mut out, &report.data)?,
            OutputFormat::Table => write!(out, "{}", chain_table(report))?,
        },
    }

    Ok(response)
}
