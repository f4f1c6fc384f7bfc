//! Chain aggregation over one snapshot.

use adapter_feeds::{ChainSource, OptionChainSnapshot, StrikeRecord};
use chrono::NaiveDateTime;
use pricer_core::types::{calendar_days_until, year_fraction_act365, Date};
use pricer_models::instruments::OptionSide;
use tracing::{info, instrument};

use crate::leg::{ExpiryContext, LegPricer};
use crate::report::put_call_ratio;
use crate::{ChainConfig, ChainError, ChainReport, ChainRow};

/// Builds [`ChainReport`]s from option-chain snapshots.
///
/// Stateless apart from its configuration; one aggregator can serve any
/// number of snapshots, including concurrently.
#[derive(Debug, Clone, Default)]
pub struct ChainAggregator {
    config: ChainConfig,
}

impl ChainAggregator {
    /// Creates an aggregator with the given settings.
    pub fn new(config: ChainConfig) -> Self {
        Self { config }
    }

    /// Returns the aggregator settings.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Builds the report for the earliest listed expiry of `snapshot`.
    ///
    /// `as_of` is the valuation instant used for days-to-expiry.
    ///
    /// # Errors
    ///
    /// * `ChainError::InvalidConfig` - unusable settings
    /// * `ChainError::NoChainData` - the snapshot has no strike records
    /// * `ChainError::NoExpiryDates` - the snapshot lists no expiries
    /// * `ChainError::Date` - a listed expiry is not `DD-Mon-YYYY`
    /// * `ChainError::NoRowsForExpiry` - no record carries the nearest expiry
    #[instrument(skip(self, snapshot), fields(mode = ?self.config.volatility_mode))]
    pub fn build(
        &self,
        symbol: &str,
        snapshot: &OptionChainSnapshot,
        as_of: NaiveDateTime,
    ) -> Result<ChainReport, ChainError> {
        self.config.validate()?;

        let symbol = symbol.to_uppercase();
        if !snapshot.has_records() {
            return Err(ChainError::NoChainData { symbol });
        }
        let listed = &snapshot.records.expiry_dates;
        if listed.is_empty() {
            return Err(ChainError::NoExpiryDates { symbol });
        }

        let quoted = snapshot.records.underlying_value;
        let underlying = if quoted == 0.0 {
            median(snapshot.strikes().collect())
        } else {
            quoted
        };
        let expiry = nearest_expiry(listed)?;
        let expiry_date = expiry.to_exchange_string();
        let days = days_to_expiry(expiry, as_of);

        let records: Vec<&StrikeRecord> = snapshot.records_for_expiry(&expiry_date).collect();
        if records.is_empty() {
            return Err(ChainError::NoRowsForExpiry {
                expiry: expiry_date,
            });
        }

        let pricer = LegPricer::new(
            ExpiryContext {
                underlying,
                expiry_years: year_fraction_act365(days),
                rate: self.config.risk_free_rate,
            },
            &self.config,
        );
        let data = self
            .config
            .parallel
            .map(&records, |record| chain_row(&pricer, record, &expiry_date, days));

        info!(
            symbol = %symbol,
            expiry = %expiry_date,
            underlying,
            days_to_expiry = days,
            rows = data.len(),
            "Built option chain report"
        );

        Ok(ChainReport {
            symbol,
            expiry_date,
            underlying_price: underlying,
            days_to_expiry: days,
            risk_free_rate: self.config.risk_free_rate,
            data,
        })
    }

    /// Fetches `symbol` from `source` and builds its report.
    ///
    /// # Errors
    ///
    /// `ChainError::Feed` when the source fails, otherwise as [`build`](Self::build).
    pub fn build_from_source<S: ChainSource + ?Sized>(
        &self,
        source: &S,
        symbol: &str,
        as_of: NaiveDateTime,
    ) -> Result<ChainReport, ChainError> {
        let snapshot = source.fetch(symbol)?;
        self.build(symbol, &snapshot, as_of)
    }
}

fn chain_row(pricer: &LegPricer, record: &StrikeRecord, expiry_date: &str, days: i64) -> ChainRow {
    let strike = record.strike_price;
    let call = pricer.summarise(strike, OptionSide::Call, &record.call_quote());
    let put = pricer.summarise(strike, OptionSide::Put, &record.put_quote());

    ChainRow {
        strike_price: strike,
        expiry_date: expiry_date.to_string(),
        underlying_price: pricer.context().underlying,
        days_to_expiry: days,
        pcr_oi: put_call_ratio(put.oi, call.oi),
        pcr_volume: put_call_ratio(put.volume, call.volume),
        call,
        put,
    }
}

/// Median of the values; mean of the middle pair for even counts, 0 when empty.
///
/// # Examples
/// ```
/// use pricer_chain::aggregator::median;
///
/// assert_eq!(median(vec![22200.0, 21800.0, 22000.0]), 22000.0);
/// assert_eq!(median(vec![100.0, 200.0]), 150.0);
/// assert_eq!(median(vec![]), 0.0);
/// ```
pub fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Earliest of the listed exchange-format expiries.
///
/// # Errors
///
/// `ChainError::Date` if any listed expiry fails to parse.
pub fn nearest_expiry(listed: &[String]) -> Result<Date, ChainError> {
    let mut nearest: Option<Date> = None;
    for raw in listed {
        let date = Date::parse_exchange(raw)?;
        nearest = Some(nearest.map_or(date, |current| current.min(date)));
    }
    nearest.ok_or(ChainError::NoExpiryDates {
        symbol: String::new(),
    })
}

/// Whole calendar days from `as_of` to the expiry's midnight, at least 1.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use pricer_chain::aggregator::days_to_expiry;
/// use pricer_core::types::Date;
///
/// let expiry = Date::from_ymd(2024, 6, 27).unwrap();
/// let morning = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap().and_hms_opt(9, 15, 0).unwrap();
/// assert_eq!(days_to_expiry(expiry, morning), 6);
///
/// let expiry_day = NaiveDate::from_ymd_opt(2024, 6, 27).unwrap().and_hms_opt(10, 0, 0).unwrap();
/// assert_eq!(days_to_expiry(expiry, expiry_day), 1);
/// ```
pub fn days_to_expiry(expiry: Date, as_of: NaiveDateTime) -> i64 {
    calendar_days_until(expiry, as_of).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapter_feeds::{LegQuote, StaticSource};
    use chrono::NaiveDate;

    fn as_of() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 20)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn record(strike: f64, expiry: &str, call_ltp: f64, put_ltp: f64) -> StrikeRecord {
        StrikeRecord {
            strike_price: strike,
            expiry_date: expiry.to_string(),
            call: Some(LegQuote {
                last_price: call_ltp,
                open_interest: 1_000.0,
                ..LegQuote::default()
            }),
            put: Some(LegQuote {
                last_price: put_ltp,
                open_interest: 500.0,
                ..LegQuote::default()
            }),
        }
    }

    fn snapshot(underlying: f64, expiries: &[&str], data: Vec<StrikeRecord>) -> OptionChainSnapshot {
        let mut snapshot = OptionChainSnapshot::default();
        snapshot.records.underlying_value = underlying;
        snapshot.records.expiry_dates = expiries.iter().map(|e| e.to_string()).collect();
        snapshot.records.data = data;
        snapshot
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(vec![7.0]), 7.0);
    }

    #[test]
    fn test_nearest_expiry_ignores_listing_order() {
        let listed = vec!["04-Jul-2024".to_string(), "27-Jun-2024".to_string()];
        assert_eq!(nearest_expiry(&listed).unwrap(), Date::from_ymd(2024, 6, 27).unwrap());
    }

    #[test]
    fn test_nearest_expiry_invalid_date() {
        let listed = vec!["2024-06-27".to_string()];
        assert!(matches!(nearest_expiry(&listed), Err(ChainError::Date(_))));
    }

    #[test]
    fn test_days_to_expiry_clamped() {
        let expiry = Date::from_ymd(2024, 6, 20).unwrap();
        assert_eq!(days_to_expiry(expiry, as_of()), 1);
        let past = Date::from_ymd(2024, 6, 1).unwrap();
        assert_eq!(days_to_expiry(past, as_of()), 1);
    }

    #[test]
    fn test_empty_snapshot_is_no_chain_data() {
        let err = ChainAggregator::default()
            .build("nifty", &OptionChainSnapshot::default(), as_of())
            .unwrap_err();
        assert!(matches!(err, ChainError::NoChainData { ref symbol } if symbol == "NIFTY"));
    }

    #[test]
    fn test_missing_expiries() {
        let snap = snapshot(22_000.0, &[], vec![record(22_000.0, "27-Jun-2024", 120.0, 105.3)]);
        let err = ChainAggregator::default().build("NIFTY", &snap, as_of()).unwrap_err();
        assert!(matches!(err, ChainError::NoExpiryDates { .. }));
    }

    #[test]
    fn test_no_rows_for_nearest_expiry() {
        let snap = snapshot(
            22_000.0,
            &["27-Jun-2024", "04-Jul-2024"],
            vec![record(22_000.0, "04-Jul-2024", 180.0, 160.0)],
        );
        let err = ChainAggregator::default().build("NIFTY", &snap, as_of()).unwrap_err();
        assert!(matches!(err, ChainError::NoRowsForExpiry { ref expiry } if expiry == "27-Jun-2024"));
    }

    #[test]
    fn test_underlying_falls_back_to_median_strike() {
        let snap = snapshot(
            0.0,
            &["27-Jun-2024"],
            vec![
                record(21_800.0, "27-Jun-2024", 0.0, 0.0),
                record(22_000.0, "27-Jun-2024", 0.0, 0.0),
                record(22_400.0, "27-Jun-2024", 0.0, 0.0),
                record(22_600.0, "27-Jun-2024", 0.0, 0.0),
            ],
        );
        let report = ChainAggregator::default().build("NIFTY", &snap, as_of()).unwrap();
        assert_eq!(report.underlying_price, 22_200.0);
        assert!(report.data.iter().all(|row| row.underlying_price == 22_200.0));
    }

    #[test]
    fn test_invalid_config_rejected_before_work() {
        let config = ChainConfig {
            risk_free_rate: f64::INFINITY,
            ..ChainConfig::default()
        };
        let snap = snapshot(22_000.0, &["27-Jun-2024"], vec![record(22_000.0, "27-Jun-2024", 120.0, 105.3)]);
        let err = ChainAggregator::new(config).build("NIFTY", &snap, as_of()).unwrap_err();
        assert!(matches!(err, ChainError::InvalidConfig(_)));
    }

    #[test]
    fn test_build_from_source_maps_feed_errors() {
        let source = StaticSource::new();
        let err = ChainAggregator::default()
            .build_from_source(&source, "NIFTY", as_of())
            .unwrap_err();
        assert!(matches!(err, ChainError::Feed(_)));
        assert_eq!(err.to_string(), "No option chain available for symbol NIFTY");
    }
}
