//! Calendar and holiday oracle.
//!
//! This module answers whether a date is a designated public holiday and
//! which dates of a month are calendar weekdays (not Saturday, not Sunday,
//! not a holiday). The holiday table has a fixed part observed every year
//! and a year-specific part for lunar holidays and substitute or temporary
//! holidays. Years without a year-specific entry get the fixed part only.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::config::HolidaysConfig;
use crate::models::PayPeriod;

const FIXED_HOLIDAYS: &[(u32, u32, &str)] = &[
    (1, 1, "New Year's Day"),
    (3, 1, "Independence Movement Day"),
    (5, 5, "Children's Day"),
    (6, 6, "Memorial Day"),
    (8, 15, "Liberation Day"),
    (10, 3, "National Foundation Day"),
    (10, 9, "Hangul Day"),
    (12, 25, "Christmas Day"),
];

const YEAR_SPECIFIC_HOLIDAYS: &[(i32, u32, u32, &str)] = &[
    (2023, 1, 21, "Seollal"),
    (2023, 1, 22, "Seollal"),
    (2023, 1, 23, "Seollal"),
    (2023, 1, 24, "Seollal (substitute)"),
    (2023, 5, 27, "Buddha's Birthday"),
    (2023, 5, 29, "Buddha's Birthday (substitute)"),
    (2023, 9, 28, "Chuseok"),
    (2023, 9, 29, "Chuseok"),
    (2023, 9, 30, "Chuseok"),
    (2023, 10, 2, "Temporary holiday"),
    (2024, 2, 9, "Seollal"),
    (2024, 2, 10, "Seollal"),
    (2024, 2, 11, "Seollal"),
    (2024, 2, 12, "Seollal (substitute)"),
    (2024, 4, 10, "National Assembly election"),
    (2024, 5, 6, "Children's Day (substitute)"),
    (2024, 5, 15, "Buddha's Birthday"),
    (2024, 9, 16, "Chuseok"),
    (2024, 9, 17, "Chuseok"),
    (2024, 9, 18, "Chuseok"),
    (2024, 10, 1, "Armed Forces Day"),
    (2025, 1, 27, "Temporary holiday"),
    (2025, 1, 28, "Seollal"),
    (2025, 1, 29, "Seollal"),
    (2025, 1, 30, "Seollal"),
    (2025, 3, 3, "Independence Movement Day (substitute)"),
    (2025, 5, 5, "Buddha's Birthday"),
    (2025, 5, 6, "Children's Day (substitute)"),
    (2025, 6, 3, "Presidential election"),
    (2025, 10, 5, "Chuseok"),
    (2025, 10, 6, "Chuseok"),
    (2025, 10, 7, "Chuseok"),
    (2025, 10, 8, "Chuseok (substitute)"),
    (2026, 2, 16, "Seollal"),
    (2026, 2, 17, "Seollal"),
    (2026, 2, 18, "Seollal"),
    (2026, 3, 2, "Independence Movement Day (substitute)"),
    (2026, 5, 24, "Buddha's Birthday"),
    (2026, 5, 25, "Buddha's Birthday (substitute)"),
    (2026, 6, 3, "Local elections"),
    (2026, 8, 17, "Liberation Day (substitute)"),
    (2026, 9, 24, "Chuseok"),
    (2026, 9, 25, "Chuseok"),
    (2026, 9, 26, "Chuseok"),
    (2026, 10, 5, "National Foundation Day (substitute)"),
];

/// A year-parameterized holiday table.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::korea();
///
/// // Liberation Day, a fixed holiday
/// assert!(calendar.is_holiday(NaiveDate::from_ymd_opt(2026, 8, 15).unwrap()));
/// // Its 2026 substitute Monday
/// assert!(calendar.is_holiday(NaiveDate::from_ymd_opt(2026, 8, 17).unwrap()));
/// // A plain Tuesday
/// assert!(calendar.is_weekday(NaiveDate::from_ymd_opt(2026, 8, 18).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    fixed: BTreeMap<(u32, u32), String>,
    by_year: BTreeMap<i32, BTreeMap<(u32, u32), String>>,
}

impl HolidayCalendar {
    /// An empty calendar: only weekends are non-working.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in Korean public holiday table.
    pub fn korea() -> Self {
        let calendar = FIXED_HOLIDAYS
            .iter()
            .fold(Self::new(), |calendar, (month, day, name)| {
                calendar.with_fixed(*month, *day, name)
            });
        YEAR_SPECIFIC_HOLIDAYS
            .iter()
            .fold(calendar, |calendar, (year, month, day, name)| {
                calendar.with_year_specific(*year, *month, *day, name)
            })
    }

    /// Builds a calendar from the YAML holiday table, validating every date.
    pub fn from_config(config: &HolidaysConfig) -> Result<Self, String> {
        let mut calendar = Self::new();
        for entry in &config.fixed {
            // 2000 is a leap year, so Feb 29 is accepted as a fixed date
            if NaiveDate::from_ymd_opt(2000, entry.month, entry.day).is_none() {
                return Err(format!(
                    "fixed holiday '{}' has impossible date {}-{}",
                    entry.name, entry.month, entry.day
                ));
            }
            calendar = calendar.with_fixed(entry.month, entry.day, &entry.name);
        }
        for (year, entries) in &config.years {
            for entry in entries {
                if NaiveDate::from_ymd_opt(*year, entry.month, entry.day).is_none() {
                    return Err(format!(
                        "holiday '{}' has impossible date {}-{}-{}",
                        entry.name, year, entry.month, entry.day
                    ));
                }
                calendar = calendar.with_year_specific(*year, entry.month, entry.day, &entry.name);
            }
        }
        Ok(calendar)
    }

    /// Adds a holiday observed every year.
    pub fn with_fixed(mut self, month: u32, day: u32, name: &str) -> Self {
        self.fixed.insert((month, day), name.to_string());
        self
    }

    /// Adds a holiday observed in one year only.
    pub fn with_year_specific(mut self, year: i32, month: u32, day: u32, name: &str) -> Self {
        self.by_year
            .entry(year)
            .or_default()
            .insert((month, day), name.to_string());
        self
    }

    /// Returns the holiday's name when `date` is a designated holiday.
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        let key = (date.month(), date.day());
        self.by_year
            .get(&date.year())
            .and_then(|holidays| holidays.get(&key))
            .or_else(|| self.fixed.get(&key))
            .map(String::as_str)
    }

    /// True when `date` is a designated public holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_name(date).is_some()
    }

    /// True when `date` is not a Saturday, not a Sunday and not a holiday.
    pub fn is_weekday(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.is_holiday(date)
    }

    /// True when `date` is a Saturday, a Sunday or a holiday.
    pub fn is_originally_public_holiday(&self, date: NaiveDate) -> bool {
        !self.is_weekday(date)
    }

    /// Every holiday of `year`, in date order.
    pub fn holidays_in_year(&self, year: i32) -> Vec<(NaiveDate, String)> {
        let mut holidays: BTreeMap<NaiveDate, String> = self
            .fixed
            .iter()
            .filter_map(|((month, day), name)| {
                NaiveDate::from_ymd_opt(year, *month, *day).map(|date| (date, name.clone()))
            })
            .collect();
        if let Some(extra) = self.by_year.get(&year) {
            for ((month, day), name) in extra {
                if let Some(date) = NaiveDate::from_ymd_opt(year, *month, *day) {
                    holidays.insert(date, name.clone());
                }
            }
        }
        holidays.into_iter().collect()
    }

    /// The calendar weekdays of `period`, in date order.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::calculation::HolidayCalendar;
    /// use payroll_engine::models::PayPeriod;
    ///
    /// let calendar = HolidayCalendar::korea();
    /// // January 2026: 22 Monday-Friday dates, minus New Year's Day
    /// let weekdays = calendar.weekdays_in(PayPeriod::new(2026, 1).unwrap());
    /// assert_eq!(weekdays.len(), 21);
    /// ```
    pub fn weekdays_in(&self, period: PayPeriod) -> Vec<NaiveDate> {
        period.dates().filter(|date| self.is_weekday(*date)).collect()
    }
}
