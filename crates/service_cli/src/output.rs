//! Output rendering: JSON, CSV and plain-text tables.

use std::io::Write;

use clap::ValueEnum;
use pricer_chain::ChainReport;
use serde::Serialize;

use crate::Result;

/// Output format of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Comma-separated values with a header row
    Csv,
    /// Human-readable table
    Table,
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Writes `rows` as CSV with a header derived from the field names.
pub fn write_csv<W: Write, T: Serialize>(out: W, rows: impl IntoIterator<Item = T>) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders `(label, value)` pairs as a two-column table.
pub fn key_value_table(title: &str, entries: &[(&str, String)]) -> String {
    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut table = format!("{title}\n{}\n", "-".repeat(title.len()));
    for (key, value) in entries {
        table.push_str(&format!("{key:<width$}  {value}\n"));
    }
    table
}

/// Renders a chain report as a strike ladder with the summary footer.
pub fn chain_table(report: &ChainReport) -> String {
    let mut table = format!(
        "{} {} | underlying {:.2} | {} day(s) | r = {}\n\n",
        report.symbol,
        report.expiry_date,
        report.underlying_price,
        report.days_to_expiry,
        report.risk_free_rate
    );

    table.push_str(&format!(
        "{:>10} {:>10} {:>8} {:>8} {:>8} | {:>10} {:>8} {:>8} {:>8} | {:>10} {:>6}\n",
        "CALL OI", "CALL LTP", "C IV", "C DELTA", "C THETA", "STRIKE", "P THETA", "P DELTA",
        "P IV", "PUT OI", "PCR"
    ));
    for row in &report.data {
        let (c, p) = (&row.call, &row.put);
        table.push_str(&format!(
            "{:>10} {:>10.2} {:>8.4} {:>8.4} {:>8.4} | {:>10.2} {:>8.4} {:>8.4} {:>8.4} | {:>10} {:>6.2}\n",
            c.oi,
            c.ltp,
            c.analytics.iv,
            c.analytics.delta,
            c.analytics.theta,
            row.strike_price,
            p.analytics.theta,
            p.analytics.delta,
            p.analytics.iv,
            p.oi,
            row.pcr_oi
        ));
    }

    let summary = report.summary();
    table.push_str(&format!(
        "\nTotal call OI {} | total put OI {} | PCR (OI) {:.4} | PCR (volume) {:.4}\n",
        summary.total_call_oi, summary.total_put_oi, summary.pcr_oi, summary.pcr_volume
    ));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_chain::{ChainRow, LegSummary};

    fn report() -> ChainReport {
        let leg = |oi: f64, volume: f64| LegSummary {
            oi,
            volume,
            ..LegSummary::default()
        };
        ChainReport {
            symbol: "NIFTY".to_string(),
            expiry_date: "27-Jun-2024".to_string(),
            underlying_price: 22000.0,
            days_to_expiry: 7,
            risk_free_rate: 0.06,
            data: vec![ChainRow {
                strike_price: 22000.0,
                expiry_date: "27-Jun-2024".to_string(),
                underlying_price: 22000.0,
                days_to_expiry: 7,
                call: leg(50000.0, 250000.0),
                put: leg(45000.0, 230000.0),
                pcr_oi: 0.9,
                pcr_volume: 0.92,
            }],
        }
    }

    #[test]
    fn test_json_ends_with_newline() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &report()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["data"][0]["call_oi"], 50000.0);
    }

    #[test]
    fn test_csv_header_matches_column_names() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &report().data).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), ChainRow::column_names().join(","));
        let first = lines.next().unwrap();
        assert!(first.starts_with("22000.0,27-Jun-2024,22000.0,7,50000.0"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_chain_table_has_summary_footer() {
        let table = chain_table(&report());
        assert!(table.starts_with("NIFTY 27-Jun-2024"));
        assert!(table.contains("PCR (OI) 0.9000"));
        assert!(table.contains("PCR (volume) 0.9200"));
    }

    #[test]
    fn test_key_value_table_alignment() {
        let table = key_value_table(
            "Greeks",
            &[("price", "1.0".to_string()), ("delta", "0.5".to_string())],
        );
        assert_eq!(table, "Greeks\n------\nprice  1.0\ndelta  0.5\n");
    }
}
