//! Report period model.
//!
//! A [`ReportPeriod`] names one calendar month. Payroll lines belong to a
//! period when the year and month of their pay date are equal to it.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{RecordsError, RecordsResult};

/// A calendar year and month.
///
/// # Example
///
/// ```
/// use personnel_records::models::ReportPeriod;
/// use chrono::NaiveDate;
///
/// let period: ReportPeriod = "2026-10".parse().unwrap();
/// assert_eq!(period.label(), "October 2026");
/// assert!(period.contains(NaiveDate::from_ymd_opt(2026, 10, 31).unwrap()));
/// assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportPeriod {
    year: i32,
    month: u32,
}

impl ReportPeriod {
    /// Creates a period, rejecting months outside 1..=12.
    pub fn new(year: i32, month: u32) -> RecordsResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(RecordsError::invalid_input(
                "period",
                format!("month {} is outside 1..=12", month),
            ));
        }
        if month_bounds(year, month).is_none() {
            return Err(RecordsError::invalid_input(
                "period",
                format!("year {} is out of range", year),
            ));
        }
        Ok(Self { year, month })
    }

    /// The period containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The calendar month, 1 through 12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns true when `date` falls in this year and month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The first and last day of the month, both inclusive.
    ///
    /// ```
    /// use personnel_records::models::ReportPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let (first, last) = ReportPeriod::new(2028, 2).unwrap().date_range();
    /// assert_eq!(first, NaiveDate::from_ymd_opt(2028, 2, 1).unwrap());
    /// assert_eq!(last, NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    /// ```
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        month_bounds(self.year, self.month).unwrap_or_default()
    }

    /// Human-readable label such as "October 2026".
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for ReportPeriod {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed =
            || RecordsError::invalid_input("period", format!("'{}' is not in YYYY-MM form", s));

        let (year, month) = s.trim().split_once('-').ok_or_else(malformed)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(malformed());
        }
        // `parse` alone would let a leading sign through.
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let year = year.parse::<i32>().map_err(|_| malformed())?;
        let month = month.parse::<u32>().map_err(|_| malformed())?;

        Self::new(year, month)
    }
}

impl TryFrom<String> for ReportPeriod {
    type Error = RecordsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReportPeriod> for String {
    fn from(period: ReportPeriod) -> Self {
        period.to_string()
    }
}
