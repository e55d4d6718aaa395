//! Day detection logic.
//!
//! This module classifies a date as a calendar weekday, Saturday, Sunday or
//! designated holiday. The classification decides whether a day can carry
//! shortfall and whether all of its worked minutes are premium-eligible.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::holidays::HolidayCalendar;

/// Represents the type of a calendar day.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::DayType;
///
/// let day_type = DayType::Saturday;
/// assert_eq!(format!("{:?}", day_type), "Saturday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday, not a holiday: the standard day applies.
    Weekday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
    /// A designated public holiday falling Monday through Friday.
    Holiday,
}

impl DayType {
    /// True for every day type other than [`DayType::Weekday`].
    pub fn is_originally_public_holiday(&self) -> bool {
        !matches!(self, DayType::Weekday)
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
            DayType::Holiday => write!(f, "Holiday"),
        }
    }
}

/// Determines the day type for a given date.
///
/// Weekends take precedence: a holiday falling on a Saturday is reported as
/// [`DayType::Saturday`].
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{get_day_type, DayType, HolidayCalendar};
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::korea();
///
/// // 2026-01-17 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
/// assert_eq!(get_day_type(saturday, &calendar), DayType::Saturday);
///
/// // 2026-01-01 is a Thursday and New Year's Day
/// let new_year = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// assert_eq!(get_day_type(new_year, &calendar), DayType::Holiday);
///
/// // 2026-01-12 is a Monday
/// let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// assert_eq!(get_day_type(monday, &calendar), DayType::Weekday);
/// ```
pub fn get_day_type(date: NaiveDate, calendar: &HolidayCalendar) -> DayType {
    match date.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ if calendar.is_holiday(date) => DayType::Holiday,
        _ => DayType::Weekday,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_monday_is_weekday() {
        let calendar = HolidayCalendar::korea();
        assert_eq!(get_day_type(make_date("2026-01-12"), &calendar), DayType::Weekday);
    }

    #[test]
    fn test_sunday_is_sunday() {
        let calendar = HolidayCalendar::korea();
        assert_eq!(get_day_type(make_date("2026-01-18"), &calendar), DayType::Sunday);
    }

    #[test]
    fn test_holiday_on_saturday_reports_saturday() {
        let calendar = HolidayCalendar::korea();
        // 2026-08-15 Liberation Day is a Saturday
        assert_eq!(get_day_type(make_date("2026-08-15"), &calendar), DayType::Saturday);
    }

    #[test]
    fn test_weekday_holiday_is_holiday() {
        let calendar = HolidayCalendar::korea();
        // 2026-09-24 Chuseok is a Thursday
        let day_type = get_day_type(make_date("2026-09-24"), &calendar);
        assert_eq!(day_type, DayType::Holiday);
        assert!(day_type.is_originally_public_holiday());
    }

    #[test]
    fn test_day_type_agrees_with_calendar_weekday() {
        let calendar = HolidayCalendar::korea();
        for date in crate::models::PayPeriod::new(2026, 10).unwrap().dates() {
            assert_eq!(
                get_day_type(date, &calendar) == DayType::Weekday,
                calendar.is_weekday(date),
                "disagreement on {}",
                date
            );
        }
    }

    #[test]
    fn test_day_type_serialization() {
        assert_eq!(
            serde_json::to_string(&DayType::Holiday).unwrap(),
            "\"holiday\""
        );
    }
}
