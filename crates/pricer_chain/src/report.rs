//! Chain report: the per-strike table and its JSON/CSV shape.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::{ChainError, LegSummary};

/// Prefix of every failure message at the output boundary.
pub const FAILURE_PREFIX: &str = "Failed to fetch option chain data with Greeks";

const CALL_COLUMNS: [&str; 10] = [
    "call_oi",
    "call_change_oi",
    "call_ltp",
    "call_volume",
    "call_delta",
    "call_gamma",
    "call_theta",
    "call_vega",
    "call_rho",
    "call_iv",
];

const PUT_COLUMNS: [&str; 10] = [
    "put_oi",
    "put_change_oi",
    "put_ltp",
    "put_volume",
    "put_delta",
    "put_gamma",
    "put_theta",
    "put_vega",
    "put_rho",
    "put_iv",
];

/// Put/call ratio, 0 when the call side is 0.
#[inline]
pub(crate) fn put_call_ratio(put: f64, call: f64) -> f64 {
    if call > 0.0 {
        put / call
    } else {
        0.0
    }
}

/// One strike of the selected expiry.
///
/// Serialises flat: `strike_price, expiry_date, underlying_price,
/// days_to_expiry`, the ten `call_*` columns, the ten `put_*` columns,
/// then `pcr_oi, pcr_volume`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainRow {
    /// Strike price
    pub strike_price: f64,
    /// Expiry in exchange format
    pub expiry_date: String,
    /// Underlying level used for pricing
    pub underlying_price: f64,
    /// Calendar days to expiry (at least 1)
    pub days_to_expiry: i64,
    /// Call leg
    pub call: LegSummary,
    /// Put leg
    pub put: LegSummary,
    /// Put OI / call OI
    pub pcr_oi: f64,
    /// Put volume / call volume
    pub pcr_volume: f64,
}

impl ChainRow {
    /// Column names in serialisation order.
    pub fn column_names() -> Vec<&'static str> {
        let mut names = vec![
            "strike_price",
            "expiry_date",
            "underlying_price",
            "days_to_expiry",
        ];
        names.extend(CALL_COLUMNS);
        names.extend(PUT_COLUMNS);
        names.extend(["pcr_oi", "pcr_volume"]);
        names
    }
}

impl Serialize for ChainRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("ChainRow", 26)?;
        row.serialize_field("strike_price", &self.strike_price)?;
        row.serialize_field("expiry_date", &self.expiry_date)?;
        row.serialize_field("underlying_price", &self.underlying_price)?;
        row.serialize_field("days_to_expiry", &self.days_to_expiry)?;
        for (name, value) in CALL_COLUMNS.into_iter().zip(self.call.columns()) {
            row.serialize_field(name, &value)?;
        }
        for (name, value) in PUT_COLUMNS.into_iter().zip(self.put.columns()) {
            row.serialize_field(name, &value)?;
        }
        row.serialize_field("pcr_oi", &self.pcr_oi)?;
        row.serialize_field("pcr_volume", &self.pcr_volume)?;
        row.end()
    }
}

/// Option chain analytics for the nearest expiry of one symbol.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChainReport {
    /// Upper-cased symbol
    pub symbol: String,
    /// Selected expiry in exchange format
    pub expiry_date: String,
    /// Underlying level used for pricing
    pub underlying_price: f64,
    /// Calendar days to expiry (at least 1)
    pub days_to_expiry: i64,
    /// Rate used for every leg
    pub risk_free_rate: f64,
    /// Rows in snapshot order
    pub data: Vec<ChainRow>,
}

/// Chain-wide open interest and volume totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct ChainSummary {
    /// Sum of call open interest
    pub total_call_oi: f64,
    /// Sum of put open interest
    pub total_put_oi: f64,
    /// Sum of call volume
    pub total_call_volume: f64,
    /// Sum of put volume
    pub total_put_volume: f64,
    /// Total put OI / total call OI
    pub pcr_oi: f64,
    /// Total put volume / total call volume
    pub pcr_volume: f64,
}

impl ChainReport {
    /// Totals and chain-level put/call ratios.
    pub fn summary(&self) -> ChainSummary {
        let mut summary = self.data.iter().fold(ChainSummary::default(), |mut acc, row| {
            acc.total_call_oi += row.call.oi;
            acc.total_put_oi += row.put.oi;
            acc.total_call_volume += row.call.volume;
            acc.total_put_volume += row.put.volume;
            acc
        });
        summary.pcr_oi = put_call_ratio(summary.total_put_oi, summary.total_call_oi);
        summary.pcr_volume = put_call_ratio(summary.total_put_volume, summary.total_call_volume);
        summary
    }
}

/// Result shape at the output boundary.
///
/// Serialises as the bare report on success and as
/// `{"error": "Failed to fetch option chain data with Greeks: <reason>"}` on
/// failure.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ChainResponse {
    /// Successful aggregation
    Report(ChainReport),
    /// Any upstream or aggregation failure
    Failure {
        /// Human-readable reason, prefixed with [`FAILURE_PREFIX`]
        error: String,
    },
}

impl ChainResponse {
    /// Returns `true` for [`ChainResponse::Failure`].
    pub fn is_failure(&self) -> bool {
        matches!(self, ChainResponse::Failure { .. })
    }
}

impl From<Result<ChainReport, ChainError>> for ChainResponse {
    fn from(result: Result<ChainReport, ChainError>) -> Self {
        match result {
            Ok(report) => ChainResponse::Report(report),
            Err(err) => ChainResponse::Failure {
                error: format!("{FAILURE_PREFIX}: {err}"),
            },
        }
    }
}
