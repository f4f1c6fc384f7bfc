//! Serde models of the exchange option-chain payload.
//!
//! Layout (unknown fields are ignored):
//!
//! ```text
//! {"records": {
//!     "expiryDates": ["27-Jun-2024", ...],
//!     "underlyingValue": 22000.0,
//!     "data": [{"strikePrice": 22000, "expiryDate": "27-Jun-2024",
//!               "CE": {"lastPrice", "openInterest", "changeinOpenInterest", "totalTradedVolume"},
//!               "PE": {...}}]
//! }}
//! ```
//!
//! Every numeric field defaults to 0 and every section to empty, so a
//! partial payload still deserialises and the analytics layer decides what
//! is missing.

use serde::{Deserialize, Serialize};

use crate::FeedError;

/// One option-chain snapshot for a single underlying.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionChainSnapshot {
    /// All listed strikes across expiries.
    #[serde(default)]
    pub records: ChainRecords,
}

/// The `records` section of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRecords {
    /// Listed expiries in exchange format (`DD-Mon-YYYY`).
    #[serde(default)]
    pub expiry_dates: Vec<String>,
    /// Last traded level of the underlying, 0 when unknown.
    #[serde(default)]
    pub underlying_value: f64,
    /// One entry per (strike, expiry) pair.
    #[serde(default)]
    pub data: Vec<StrikeRecord>,
}

/// Quotes of the call and put legs at one strike and expiry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrikeRecord {
    /// Strike price.
    #[serde(default)]
    pub strike_price: f64,
    /// Expiry in exchange format.
    #[serde(default)]
    pub expiry_date: String,
    /// Call leg, absent when the strike lists no call.
    #[serde(rename = "CE", default, skip_serializing_if = "Option::is_none")]
    pub call: Option<LegQuote>,
    /// Put leg, absent when the strike lists no put.
    #[serde(rename = "PE", default, skip_serializing_if = "Option::is_none")]
    pub put: Option<LegQuote>,
}

impl StrikeRecord {
    /// Call quote, all zeros when the leg is absent.
    pub fn call_quote(&self) -> LegQuote {
        self.call.unwrap_or_default()
    }

    /// Put quote, all zeros when the leg is absent.
    pub fn put_quote(&self) -> LegQuote {
        self.put.unwrap_or_default()
    }
}

/// Market data of a single option leg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegQuote {
    /// Last traded premium.
    #[serde(default)]
    pub last_price: f64,
    /// Open interest in contracts.
    #[serde(default)]
    pub open_interest: f64,
    /// Change in open interest over the session.
    #[serde(rename = "changeinOpenInterest", default)]
    pub change_in_open_interest: f64,
    /// Contracts traded in the session.
    #[serde(default)]
    pub total_traded_volume: f64,
}

impl OptionChainSnapshot {
    /// Parses a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::Parse` when the text is not valid JSON or a field
    /// has the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self, FeedError> {
        Self::from_json_slice(json.as_bytes(), "<inline>")
    }

    /// Parses a snapshot from raw JSON bytes, naming `origin` in errors.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::Parse` when the bytes are not a valid payload.
    pub fn from_json_slice(bytes: &[u8], origin: &str) -> Result<Self, FeedError> {
        serde_json::from_slice(bytes).map_err(|source| FeedError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    /// True when the snapshot lists at least one strike record.
    pub fn has_records(&self) -> bool {
        !self.records.data.is_empty()
    }

    /// Strike prices of every record, in payload order.
    pub fn strikes(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.data.iter().map(|record| record.strike_price)
    }

    /// Records listed for one expiry, in payload order.
    pub fn records_for_expiry<'a>(
        &'a self,
        expiry: &'a str,
    ) -> impl Iterator<Item = &'a StrikeRecord> + 'a {
        self.records
            .data
            .iter()
            .filter(move |record| record.expiry_date == expiry)
    }
}
