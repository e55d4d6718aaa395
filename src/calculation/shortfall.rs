//! Shortfall minutes and the resulting deduction.
//!
//! Only calendar weekdays carry a standard day. Weekends and designated
//! holidays never contribute shortfall, whatever their status.

use rust_decimal::Decimal;

use crate::config::PayrollPolicy;
use crate::models::{AuditStep, NormalizedRecord, WorkStatus};

use super::holidays::HolidayCalendar;

/// The result of the shortfall calculation.
#[derive(Debug, Clone)]
pub struct ShortfallResult {
    /// Minutes short of the standard day, summed over calendar weekdays.
    pub total_minutes: i64,
    /// Shortfall minutes priced at the minute rate.
    pub deduction: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Shortfall for one record on a calendar weekday.
///
/// ABSENCE and UNPAID_HOLIDAY forfeit the whole standard day, NORMAL days
/// forfeit whatever is missing and PAID_HOLIDAY forfeits nothing.
pub fn shortfall_minutes(record: &NormalizedRecord, standard_daily_minutes: i64) -> i64 {
    match record.record.status {
        WorkStatus::Absence | WorkStatus::UnpaidHoliday => standard_daily_minutes,
        WorkStatus::Normal => (standard_daily_minutes - record.net_work_minutes).max(0),
        WorkStatus::PaidHoliday => 0,
    }
}

/// Sums shortfall over the calendar weekdays of `records` and prices it.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{calculate_shortfall, normalize_record, HolidayCalendar};
/// use payroll_engine::config::PayrollPolicy;
/// use payroll_engine::models::{DailyRecord, WorkStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let calendar = HolidayCalendar::korea();
/// let policy = PayrollPolicy::default();
/// let absent_monday = DailyRecord {
///     status: WorkStatus::Absence,
///     ..DailyRecord::empty(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap())
/// };
/// let records = vec![normalize_record(&absent_monday, &calendar, &policy)];
///
/// let result = calculate_shortfall(&records, &calendar, Decimal::from(200), &policy, 1);
/// assert_eq!(result.total_minutes, 480);
/// assert_eq!(result.deduction, Decimal::from(96_000));
/// ```
pub fn calculate_shortfall(
    records: &[NormalizedRecord],
    calendar: &HolidayCalendar,
    minute_rate: Decimal,
    policy: &PayrollPolicy,
    step_number: u32,
) -> ShortfallResult {
    let mut weekday_records = 0usize;
    let mut short_days = 0usize;
    let mut total_minutes = 0i64;

    for record in records.iter().filter(|r| calendar.is_weekday(r.record.date)) {
        weekday_records += 1;
        let minutes = shortfall_minutes(record, policy.standard_daily_minutes);
        if minutes > 0 {
            short_days += 1;
            total_minutes += minutes;
        }
    }

    let deduction = Decimal::from(total_minutes) * minute_rate;

    let audit_step = AuditStep {
        step_number,
        rule_id: "shortfall".to_string(),
        rule_name: "Shortfall Deduction".to_string(),
        input: serde_json::json!({
            "weekday_records": weekday_records,
            "standard_daily_minutes": policy.standard_daily_minutes,
            "minute_rate": minute_rate.to_string()
        }),
        output: serde_json::json!({
            "short_days": short_days,
            "total_minutes": total_minutes,
            "deduction": deduction.to_string()
        }),
        reasoning: format!(
            "{} of {} weekdays fell short by {} minutes in total: {} x {} = {}",
            short_days,
            weekday_records,
            total_minutes,
            total_minutes,
            minute_rate.round_dp(4),
            deduction.round_dp(2)
        ),
    };

    ShortfallResult {
        total_minutes,
        deduction,
        audit_step,
    }
}
