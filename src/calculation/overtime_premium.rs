//! Additional overtime premium.
//!
//! The fixed overtime allowance already pays for a block of overtime each
//! month. Premium-eligible minutes beyond that block are paid at the
//! ordinary hourly rate times the premium multiplier.

use rust_decimal::Decimal;

use crate::config::PayrollPolicy;
use crate::models::{AuditStep, NormalizedRecord, WorkStatus};

/// The result of the overtime premium calculation.
#[derive(Debug, Clone)]
pub struct OvertimePremiumResult {
    /// Premium-eligible minutes summed over the month.
    pub eligible_minutes: i64,
    /// Eligible minutes beyond the fixed overtime block.
    pub paid_minutes: i64,
    /// Premium amount.
    pub premium: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// True when every worked minute of the day counts as overtime.
///
/// That is the case for a day that is originally a public holiday (weekend
/// or designated holiday) and for a PAID_HOLIDAY day that was worked anyway.
pub fn is_holiday_worked(record: &NormalizedRecord) -> bool {
    record.net_work_minutes > 0
        && (record.is_originally_public_holiday || record.record.status == WorkStatus::PaidHoliday)
}

/// Premium-eligible minutes for one record.
pub fn eligible_minutes(record: &NormalizedRecord, standard_daily_minutes: i64) -> i64 {
    if record.record.status.is_non_working() || record.net_work_minutes <= 0 {
        return 0;
    }
    if is_holiday_worked(record) {
        record.net_work_minutes
    } else {
        (record.net_work_minutes - standard_daily_minutes).max(0)
    }
}

/// Sums eligible minutes and prices the excess over the fixed block.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{calculate_overtime_premium, normalize_record, HolidayCalendar};
/// use payroll_engine::config::PayrollPolicy;
/// use payroll_engine::models::DailyRecord;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let calendar = HolidayCalendar::korea();
/// let policy = PayrollPolicy::default();
/// // Two full Saturdays: 960 eligible minutes, 360 beyond the fixed 600
/// let records: Vec<_> = [17, 24]
///     .into_iter()
///     .map(|day| DailyRecord {
///         start_time: NaiveTime::from_hms_opt(9, 0, 0),
///         end_time: NaiveTime::from_hms_opt(18, 0, 0),
///         ..DailyRecord::empty(NaiveDate::from_ymd_opt(2026, 1, day).unwrap())
///     })
///     .map(|record| normalize_record(&record, &calendar, &policy))
///     .collect();
///
/// let result = calculate_overtime_premium(&records, Decimal::from(10_000), &policy, 1);
/// assert_eq!(result.paid_minutes, 360);
/// assert_eq!(result.premium, Decimal::from(90_000));
/// ```
pub fn calculate_overtime_premium(
    records: &[NormalizedRecord],
    hourly_rate: Decimal,
    policy: &PayrollPolicy,
    step_number: u32,
) -> OvertimePremiumResult {
    let mut holiday_days = 0usize;
    let mut eligible_total = 0i64;

    for record in records {
        let minutes = eligible_minutes(record, policy.standard_daily_minutes);
        if minutes > 0 && is_holiday_worked(record) {
            holiday_days += 1;
        }
        eligible_total += minutes;
    }

    let threshold = policy.overtime.fixed_overtime_minutes;
    let paid_minutes = (eligible_total - threshold).max(0);
    let premium = hourly_rate * Decimal::from(paid_minutes) / Decimal::from(60)
        * policy.overtime.premium_multiplier;

    let reasoning = if paid_minutes == 0 {
        format!(
            "{} eligible minutes are within the fixed overtime block of {}: no premium",
            eligible_total, threshold
        )
    } else {
        format!(
            "{} eligible minutes ({} holiday-worked days) exceed {} by {}: {} x {}/60 x {} = {}",
            eligible_total,
            holiday_days,
            threshold,
            paid_minutes,
            hourly_rate.round_dp(2),
            paid_minutes,
            policy.overtime.premium_multiplier,
            premium.round_dp(2)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_premium".to_string(),
        rule_name: "Additional Overtime Premium".to_string(),
        input: serde_json::json!({
            "hourly_rate": hourly_rate.to_string(),
            "fixed_overtime_minutes": threshold,
            "premium_multiplier": policy.overtime.premium_multiplier.to_string()
        }),
        output: serde_json::json!({
            "eligible_minutes": eligible_total,
            "holiday_worked_days": holiday_days,
            "paid_minutes": paid_minutes,
            "premium": premium.to_string()
        }),
        reasoning,
    };

    OvertimePremiumResult {
        eligible_minutes: eligible_total,
        paid_minutes,
        premium,
        audit_step,
    }
}
