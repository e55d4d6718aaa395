//! Weekly holiday allowance penalty.
//!
//! A week containing at least one weekday ABSENCE forfeits the weekly holiday
//! allowance once, however many absences the week holds. UNPAID_HOLIDAY
//! never triggers the penalty.

use std::collections::BTreeSet;

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::config::PayrollPolicy;
use crate::models::{AuditStep, IsoWeekKey, NormalizedRecord, WorkStatus};

use super::holidays::HolidayCalendar;

/// The result of the weekly penalty calculation.
#[derive(Debug, Clone)]
pub struct WeeklyPenaltyResult {
    /// Distinct ISO weeks containing a weekday absence, in order.
    pub weeks: Vec<IsoWeekKey>,
    /// Total penalty: weeks x hourly rate x allowance hours.
    pub penalty: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the ISO week key for a date.
pub fn iso_week_key(date: chrono::NaiveDate) -> IsoWeekKey {
    let week = date.iso_week();
    IsoWeekKey {
        year: week.year(),
        week: week.week(),
    }
}

/// Charges the weekly allowance once per ISO week with a weekday absence.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{calculate_weekly_penalty, normalize_record, HolidayCalendar};
/// use payroll_engine::config::PayrollPolicy;
/// use payroll_engine::models::{DailyRecord, WorkStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let calendar = HolidayCalendar::korea();
/// let policy = PayrollPolicy::default();
/// let absent = |day| DailyRecord {
///     status: WorkStatus::Absence,
///     ..DailyRecord::empty(NaiveDate::from_ymd_opt(2026, 1, day).unwrap())
/// };
/// // Monday and Tuesday of the same week
/// let records: Vec<_> = [12, 13]
///     .into_iter()
///     .map(|day| normalize_record(&absent(day), &calendar, &policy))
///     .collect();
///
/// let result = calculate_weekly_penalty(&records, &calendar, Decimal::from(10_000), &policy, 1);
/// assert_eq!(result.weeks.len(), 1);
/// assert_eq!(result.penalty, Decimal::from(80_000));
/// ```
pub fn calculate_weekly_penalty(
    records: &[NormalizedRecord],
    calendar: &HolidayCalendar,
    hourly_rate: Decimal,
    policy: &PayrollPolicy,
    step_number: u32,
) -> WeeklyPenaltyResult {
    let weeks: BTreeSet<IsoWeekKey> = records
        .iter()
        .filter(|r| r.record.status == WorkStatus::Absence && calendar.is_weekday(r.record.date))
        .map(|r| iso_week_key(r.record.date))
        .collect();
    let weeks: Vec<IsoWeekKey> = weeks.into_iter().collect();

    let per_week = hourly_rate * policy.weekly_holiday_allowance_hours;
    let penalty = per_week * Decimal::from(weeks.len());

    let reasoning = if weeks.is_empty() {
        "No weekday absences: no weekly holiday allowance forfeited".to_string()
    } else {
        format!(
            "Absences in {} week(s) ({}): {} x {} hours x {} = {}",
            weeks.len(),
            weeks
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            weeks.len(),
            policy.weekly_holiday_allowance_hours,
            hourly_rate.round_dp(2),
            penalty.round_dp(2)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "weekly_penalty".to_string(),
        rule_name: "Weekly Holiday Allowance Penalty".to_string(),
        input: serde_json::json!({
            "hourly_rate": hourly_rate.to_string(),
            "allowance_hours": policy.weekly_holiday_allowance_hours.to_string()
        }),
        output: serde_json::json!({
            "weeks": weeks.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "penalty": penalty.to_string()
        }),
        reasoning,
    };

    WeeklyPenaltyResult {
        weeks,
        penalty,
        audit_step,
    }
}
