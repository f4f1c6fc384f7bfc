//! Exchange date handling for option expiries.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - Exchange expiry format (`DD-Mon-YYYY`, e.g. `27-Jun-2024`)
//! - Calendar-day distances and ACT/365 year fractions
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{calendar_days_until, year_fraction_act365, Date};
//!
//! let expiry = Date::parse_exchange("27-Jun-2024").unwrap();
//! let as_of = Date::from_ymd(2024, 6, 20).unwrap().start_of_day();
//!
//! let days = calendar_days_until(expiry, as_of);
//! assert_eq!(days, 7);
//! assert!((year_fraction_act365(days) - 7.0 / 365.0).abs() < 1e-15);
//! ```

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Calendar days per year under ACT/365 Fixed.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Expiry date layout used by the exchange option-chain feed.
pub const EXCHANGE_DATE_FORMAT: &str = "%d-%b-%Y";

const SECONDS_PER_DAY: i64 = 86_400;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Displays as ISO 8601; the exchange layout is available through
/// [`Date::parse_exchange`] and [`Date::to_exchange_string`].
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 27).unwrap();
/// assert_eq!(date.to_string(), "2024-06-27");
/// assert_eq!(date.to_exchange_string(), "27-Jun-2024");
///
/// let parsed: Date = "2024-06-27".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2024, 6, 20).unwrap();
/// assert_eq!(date - start, 7);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2024, 2, 30).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date based on local system time.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::parse("2024-06-15").unwrap();
    /// assert_eq!(date.year(), 2024);
    ///
    /// assert!(Date::parse("not-a-date").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("'{}': {}", s, e)))
    }

    /// Parses an exchange-formatted expiry (`DD-Mon-YYYY`).
    ///
    /// Month abbreviations are matched case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::parse_exchange("04-Jul-2024").unwrap();
    /// assert_eq!((date.year(), date.month(), date.day()), (2024, 7, 4));
    ///
    /// assert!(Date::parse_exchange("2024-07-04").is_err());
    /// ```
    pub fn parse_exchange(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), EXCHANGE_DATE_FORMAT)
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("'{}': {}", s, e)))
    }

    /// Formats the date in the exchange layout (`DD-Mon-YYYY`).
    pub fn to_exchange_string(&self) -> String {
        self.0.format(EXCHANGE_DATE_FORMAT).to_string()
    }

    /// Returns midnight at the start of this date.
    pub fn start_of_day(&self) -> NaiveDateTime {
        self.0.and_time(NaiveTime::MIN)
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Whole calendar days from `as_of` until the start of `expiry`.
///
/// The distance is floored, so any time past midnight on the day before
/// expiry already counts as zero days, and a past expiry is negative.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use pricer_core::types::time::{calendar_days_until, Date};
///
/// let expiry = Date::from_ymd(2024, 6, 27).unwrap();
/// let morning = Date::from_ymd(2024, 6, 26)
///     .unwrap()
///     .into_inner()
///     .and_time(NaiveTime::from_hms_opt(9, 15, 0).unwrap());
///
/// assert_eq!(calendar_days_until(expiry, morning), 0);
/// ```
pub fn calendar_days_until(expiry: Date, as_of: NaiveDateTime) -> i64 {
    let seconds = (expiry.start_of_day() - as_of).num_seconds();
    seconds.div_euclid(SECONDS_PER_DAY)
}

/// Converts a number of calendar days to a year fraction (ACT/365 Fixed).
#[inline]
pub fn year_fraction_act365(days: i64) -> f64 {
    days as f64 / DAYS_PER_YEAR
}
