//! Work record normalization.
//!
//! This module turns a raw day entry into net worked minutes. Breaks are
//! earned only by minutes outside the night window, so a shift worked
//! entirely at night carries no deducted break.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::config::PayrollPolicy;
use crate::models::{DailyRecord, NormalizedRecord};

use super::day_detection::get_day_type;
use super::holidays::HolidayCalendar;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Minute breakdown of a single shift.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_work_minutes;
/// use payroll_engine::config::PayrollPolicy;
/// use chrono::NaiveTime;
///
/// let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let end = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
/// let minutes = calculate_work_minutes(start, end, &PayrollPolicy::default());
///
/// assert_eq!(minutes.gross_minutes, 540);
/// assert_eq!(minutes.break_minutes, 60);
/// assert_eq!(minutes.net_minutes, 480);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkMinutes {
    /// Minutes between start and end, crossing midnight when end < start.
    pub gross_minutes: i64,
    /// Gross minutes falling outside the night window.
    pub non_night_minutes: i64,
    /// Unpaid break minutes.
    pub break_minutes: i64,
    /// Gross minus breaks, floored at zero.
    pub net_minutes: i64,
}

fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight() / 60)
}

fn overlap(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> i64 {
    (a_end.min(b_end) - a_start.max(b_start)).max(0)
}

/// Splits a shift into gross, non-night, break and net minutes.
///
/// A shift whose end is numerically before its start crosses midnight. Equal
/// start and end times give a zero-length shift.
pub fn calculate_work_minutes(start: NaiveTime, end: NaiveTime, policy: &PayrollPolicy) -> WorkMinutes {
    let start_minute = minute_of_day(start);
    let end_minute = minute_of_day(end);
    let gross_minutes = if end_minute < start_minute {
        end_minute + MINUTES_PER_DAY - start_minute
    } else {
        end_minute - start_minute
    };
    let shift_end = start_minute + gross_minutes;

    // The daytime window [night end, night start) on the shift's day and the next one
    let day_start = minute_of_day(policy.night_window.end);
    let day_end = minute_of_day(policy.night_window.start);
    let non_night_minutes: i64 = [0, MINUTES_PER_DAY]
        .iter()
        .map(|offset| overlap(start_minute, shift_end, offset + day_start, offset + day_end))
        .sum();

    let rules = &policy.break_rules;
    let mut break_minutes = (non_night_minutes / rules.block_minutes) * rules.break_per_block_minutes;
    if non_night_minutes >= rules.long_shift_minutes {
        break_minutes = break_minutes.max(rules.long_shift_minimum_break_minutes);
    }

    WorkMinutes {
        gross_minutes,
        non_night_minutes,
        break_minutes,
        net_minutes: (gross_minutes - break_minutes).max(0),
    }
}

/// Derives net worked minutes and the public-holiday flag for one record.
///
/// UNPAID_HOLIDAY and ABSENCE records, and records missing either time,
/// always yield zero minutes.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{normalize_record, HolidayCalendar};
/// use payroll_engine::config::PayrollPolicy;
/// use payroll_engine::models::{DailyRecord, WorkStatus};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let record = DailyRecord {
///     date: NaiveDate::from_ymd_opt(2026, 1, 17).unwrap(), // Saturday
///     start_time: NaiveTime::from_hms_opt(22, 0, 0),
///     end_time: NaiveTime::from_hms_opt(6, 0, 0),
///     status: WorkStatus::Normal,
/// };
/// let normalized = normalize_record(&record, &HolidayCalendar::korea(), &PayrollPolicy::default());
///
/// assert_eq!(normalized.net_work_minutes, 480); // all night, no break
/// assert!(normalized.is_originally_public_holiday);
/// ```
pub fn normalize_record(
    record: &DailyRecord,
    calendar: &HolidayCalendar,
    policy: &PayrollPolicy,
) -> NormalizedRecord {
    let net_work_minutes = match record.times() {
        Some((start, end)) if !record.status.is_non_working() => {
            calculate_work_minutes(start, end, policy).net_minutes
        }
        _ => 0,
    };

    NormalizedRecord {
        record: record.clone(),
        is_originally_public_holiday: get_day_type(record.date, calendar)
            .is_originally_public_holiday(),
        net_work_minutes,
    }
}
