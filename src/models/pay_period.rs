//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type: one calendar month, the unit
//! every calculation run and every persisted pay record is keyed by.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month targeted by a calculation run.
///
/// Construction validates the month, so every accessor can rely on the
/// period mapping to real dates.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(2024, 2).unwrap();
/// assert_eq!(period.days_in_month(), 29);
/// assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert!(PayPeriod::new(2024, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPayPeriod")]
pub struct PayPeriod {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPayPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawPayPeriod> for PayPeriod {
    type Error = EngineError;

    fn try_from(raw: RawPayPeriod) -> Result<Self, Self::Error> {
        PayPeriod::new(raw.year, raw.month)
    }
}

impl PayPeriod {
    /// Creates a pay period, rejecting months outside 1..=12 and unrepresentable years.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidParameter {
                field: "period".to_string(),
                message: format!("{}-{:02} is not a valid calendar month", year, month),
            });
        }
        Ok(Self { year, month })
    }

    /// Returns the period containing `date`.
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

    /// The calendar month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // year and month are checked in `new`
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            + chrono::Duration::days(i64::from(self.days_in_month()) - 1)
    }

    /// Number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .map(|next_first| (next_first - self.first_day()).num_days() as u32)
            .unwrap_or(31)
    }

    /// Checks if a given date falls within this month.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period = PayPeriod::new(2026, 1).unwrap();
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
    /// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
    /// ```
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Iterates over every date of the month in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.first_day()
            .iter_days()
            .take(self.days_in_month() as usize)
    }
}

impl std::fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(PayPeriod::new(2026, 1).unwrap().days_in_month(), 31);
        assert_eq!(PayPeriod::new(2026, 2).unwrap().days_in_month(), 28);
        assert_eq!(PayPeriod::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(PayPeriod::new(2026, 4).unwrap().days_in_month(), 30);
        assert_eq!(PayPeriod::new(2026, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_first_and_last_day() {
        let period = PayPeriod::new(2025, 12).unwrap();
        assert_eq!(period.first_day(), make_date("2025-12-01"));
        assert_eq!(period.last_day(), make_date("2025-12-31"));
    }

    #[test]
    fn test_invalid_month_rejected() {
        let result = PayPeriod::new(2026, 0);
        match result {
            Err(EngineError::InvalidParameter { field, .. }) => assert_eq!(field, "period"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_dates_covers_whole_month() {
        let period = PayPeriod::new(2026, 2).unwrap();
        let dates: Vec<NaiveDate> = period.dates().collect();
        assert_eq!(dates.len(), 28);
        assert_eq!(dates[0], make_date("2026-02-01"));
        assert_eq!(dates[27], make_date("2026-02-28"));
    }

    #[test]
    fn test_of_date() {
        let period = PayPeriod::of(make_date("2026-03-17"));
        assert_eq!(period, PayPeriod::new(2026, 3).unwrap());
    }

    #[test]
    fn test_deserialize_validates_month() {
        let ok: PayPeriod = serde_json::from_str(r#"{"year": 2026, "month": 5}"#).unwrap();
        assert_eq!(ok.month(), 5);

        let bad: Result<PayPeriod, _> = serde_json::from_str(r#"{"year": 2026, "month": 14}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(PayPeriod::new(2026, 3).unwrap().to_string(), "2026-03");
    }
}
