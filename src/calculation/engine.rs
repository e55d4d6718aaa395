//! The monthly payroll adjustment engine.
//!
//! [`compute`] runs every adjustment step in order over one owned
//! [`CalculationContext`] and returns a [`PayResult`] carrying the final
//! components, the intermediate values and an audit trace. It reads no
//! shared state and writes nothing.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PayrollConfig;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CalculationContext, DailyRecord, DayCounts,
    DeductionShares, NormalizedRecord, PayComponents, PayResult, ProratedContract, WorkStatus,
};

use super::deduction_distribution::distribute_deduction;
use super::hire_proration::calculate_hire_proration;
use super::holidays::HolidayCalendar;
use super::ordinary_rate::calculate_ordinary_rate;
use super::overtime_premium::calculate_overtime_premium;
use super::salary_percentage::apply_salary_percentage;
use super::shortfall::calculate_shortfall;
use super::weekly_penalty::calculate_weekly_penalty;
use super::work_minutes::normalize_record;

/// Computes the monthly pay for one employee and period.
///
/// # Errors
///
/// Returns `InvalidParameter` for a negative salary percentage, a negative
/// ad-hoc bonus or a negative contract amount, and `CalculationError` when a
/// deduction or salary percentage pushes pay past the currency range. No partial result
/// is produced.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{CalculationContext, Contract, Employee, PayPeriod};
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Kim".to_string(),
///     annual_salary: 36_000_000,
///     hire_date: None,
///     department: None,
///     position: None,
/// };
/// let contract = Contract { basic_salary: 2_500_000, ..Contract::default() };
/// let period = PayPeriod::new(2026, 1).unwrap();
///
/// // No records at all: every weekday is short a full day
/// let context = CalculationContext::new(employee, contract, period, Vec::new());
/// let result = compute(&context, ConfigLoader::builtin().config()).unwrap();
///
/// assert_eq!(result.total_shortfall_minutes, 21 * 480);
/// assert_eq!(result.final_pay.basic_salary.to_string(), "0");
/// ```
pub fn compute(context: &CalculationContext, config: &PayrollConfig) -> EngineResult<PayResult> {
    context.validate()?;

    let policy = config.policy();
    let calendar = config.holidays();
    let period = context.period;
    let mut warnings = Vec::new();
    let mut steps = Vec::new();

    let records = prepare_records(context, calendar, &mut warnings);
    let normalized: Vec<NormalizedRecord> = records
        .iter()
        .map(|record| normalize_record(record, calendar, policy))
        .collect();

    let mut step_number: u32 = 1;
    let mut next_step = || {
        let current = step_number;
        step_number += 1;
        current
    };

    let proration =
        calculate_hire_proration(&context.employee, &context.contract, period, next_step());
    steps.push(proration.audit_step);
    let prorated = proration.prorated;

    let rate = calculate_ordinary_rate(
        context.employee.annual_salary,
        proration.ratio,
        policy,
        next_step(),
    );
    steps.push(rate.audit_step);

    let shortfall = calculate_shortfall(&normalized, calendar, rate.minute_rate, policy, next_step());
    steps.push(shortfall.audit_step);

    let penalty =
        calculate_weekly_penalty(&normalized, calendar, rate.hourly_rate, policy, next_step());
    steps.push(penalty.audit_step);

    let premium = calculate_overtime_premium(&normalized, rate.hourly_rate, policy, next_step());
    steps.push(premium.audit_step);

    let distribution = distribute_deduction(&prorated, shortfall.deduction, next_step())?;
    steps.push(distribution.audit_step);

    let (interim, interim_step) = interim_components(
        &prorated,
        &distribution.shares,
        penalty.penalty,
        premium.premium,
        context.ad_hoc_bonus,
        next_step(),
    );
    steps.push(interim_step);

    let (attendance_ratio, attendance_step) =
        attendance_ratio(&prorated, shortfall.deduction, penalty.penalty, next_step());
    steps.push(attendance_step);

    let percentage = apply_salary_percentage(
        &interim,
        prorated.total(),
        context.salary_percentage,
        context.ad_hoc_bonus,
        next_step(),
    )?;
    steps.push(percentage.audit_step);

    let (final_pay, clamp_step) = clamp_components(&percentage.components, next_step());
    steps.push(clamp_step);

    let day_counts = count_days(&normalized, calendar);

    debug!(
        employee_id = %context.employee.id,
        period = %period,
        records = normalized.len(),
        shortfall_minutes = shortfall.total_minutes,
        penalised_weeks = penalty.weeks.len(),
        paid_premium_minutes = premium.paid_minutes,
        final_total = %final_pay.total().round_dp(2),
        warnings = warnings.len(),
        "Payroll calculation completed"
    );

    Ok(PayResult {
        employee_id: context.employee.id.clone(),
        period,
        contract: context.contract.clone(),
        hire_proration_ratio: proration.ratio,
        prorated,
        monthly_equivalent: rate.monthly_equivalent,
        ordinary_hourly_rate: rate.hourly_rate,
        minute_rate: rate.minute_rate,
        total_shortfall_minutes: shortfall.total_minutes,
        shortfall_deduction: shortfall.deduction,
        penalised_weeks: penalty.weeks,
        weekly_penalty: penalty.penalty,
        premium_eligible_minutes: premium.eligible_minutes,
        paid_premium_minutes: premium.paid_minutes,
        overtime_premium: premium.premium,
        deduction_shares: distribution.shares,
        attendance_ratio,
        salary_percentage: context.salary_percentage,
        ad_hoc_bonus: context.ad_hoc_bonus,
        percentage_excess: percentage.percentage_excess,
        interim,
        final_pay,
        day_counts,
        records: normalized,
        audit_trace: AuditTrace { steps, warnings },
    })
}

/// Restricts the records to the period and fills in missing weekdays.
///
/// Weekdays on or after the hire date with no record at all become empty
/// NORMAL records. The result is sorted by date.
fn prepare_records(
    context: &CalculationContext,
    calendar: &HolidayCalendar,
    warnings: &mut Vec<AuditWarning>,
) -> Vec<DailyRecord> {
    let period = context.period;
    let (mut records, outside): (Vec<DailyRecord>, Vec<DailyRecord>) = context
        .records
        .iter()
        .cloned()
        .partition(|record| period.contains_date(record.date));

    if !outside.is_empty() {
        warnings.push(AuditWarning {
            code: "RECORD_OUTSIDE_PERIOD".to_string(),
            message: format!(
                "{} record(s) dated outside {} were ignored: {}",
                outside.len(),
                period,
                join_dates(outside.iter().map(|r| r.date))
            ),
            severity: "low".to_string(),
        });
    }

    let mut per_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in &records {
        *per_date.entry(record.date).or_default() += 1;
    }
    let duplicated: Vec<NaiveDate> = per_date
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(date, _)| *date)
        .collect();
    if !duplicated.is_empty() {
        warnings.push(AuditWarning {
            code: "DUPLICATE_RECORD_DATE".to_string(),
            message: format!(
                "More than one record for {}; each is counted",
                join_dates(duplicated.into_iter())
            ),
            severity: "medium".to_string(),
        });
    }

    let hire_date = context.employee.hire_date;
    let missing: Vec<NaiveDate> = calendar
        .weekdays_in(period)
        .into_iter()
        .filter(|date| !per_date.contains_key(date))
        .filter(|date| hire_date.is_none_or(|hired| *date >= hired))
        .collect();
    if !missing.is_empty() {
        warnings.push(AuditWarning {
            code: "MISSING_WEEKDAY_RECORD".to_string(),
            message: format!(
                "{} weekday(s) without a record were treated as not worked: {}",
                missing.len(),
                join_dates(missing.iter().copied())
            ),
            severity: "medium".to_string(),
        });
        records.extend(missing.into_iter().map(DailyRecord::empty));
    }

    records.sort_by_key(|record| record.date);
    records
}

fn join_dates(dates: impl Iterator<Item = NaiveDate>) -> String {
    dates.map(|d| d.to_string()).collect::<Vec<_>>().join(", ")
}

/// Reduces the prorated components by their deduction shares.
///
/// The weekly penalty is charged against basic salary only. The ad-hoc
/// bonus joins the contractual bonus here.
fn interim_components(
    prorated: &ProratedContract,
    shares: &DeductionShares,
    weekly_penalty: Decimal,
    overtime_premium: Decimal,
    ad_hoc_bonus: Option<i64>,
    step_number: u32,
) -> (PayComponents, AuditStep) {
    let ad_hoc = ad_hoc_bonus.map(Decimal::from).unwrap_or_default();
    let interim = PayComponents {
        basic_salary: prorated.basic_salary - shares.basic_salary - weekly_penalty,
        fixed_overtime_allowance: prorated.fixed_overtime_allowance
            - shares.fixed_overtime_allowance,
        additional_overtime_premium: overtime_premium,
        bonus: prorated.bonus + ad_hoc,
        other_allowance: prorated.other_allowance,
        meal_allowance: prorated.meal_allowance - shares.meal_allowance,
        vehicle_maintenance_fee: prorated.vehicle_maintenance_fee
            - shares.vehicle_maintenance_fee,
        research_expense: prorated.research_expense - shares.research_expense,
        childcare_allowance: prorated.childcare_allowance - shares.childcare_allowance,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "interim_components".to_string(),
        rule_name: "Interim Components".to_string(),
        input: serde_json::json!({
            "prorated_total": prorated.total().to_string(),
            "distributed_deduction": shares.total().to_string(),
            "weekly_penalty": weekly_penalty.to_string(),
            "overtime_premium": overtime_premium.to_string(),
            "ad_hoc_bonus": ad_hoc_bonus
        }),
        output: serde_json::to_value(&interim).unwrap_or_default(),
        reasoning: format!(
            "Basic salary {} - share {} - weekly penalty {} = {}",
            prorated.basic_salary.round_dp(2),
            shares.basic_salary.round_dp(2),
            weekly_penalty.round_dp(2),
            interim.basic_salary.round_dp(2)
        ),
    };

    (interim, audit_step)
}

/// Display-only ratio of what remains of the prorated total after deductions.
fn attendance_ratio(
    prorated: &ProratedContract,
    shortfall_deduction: Decimal,
    weekly_penalty: Decimal,
    step_number: u32,
) -> (Decimal, AuditStep) {
    let total = prorated.total();
    let deductions = shortfall_deduction + weekly_penalty;

    let ratio = if total > Decimal::ZERO {
        ((total - deductions) / total).max(Decimal::ZERO)
    } else if deductions.is_zero() {
        Decimal::ONE
    } else {
        Decimal::ZERO
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "attendance_ratio".to_string(),
        rule_name: "Attendance Ratio".to_string(),
        input: serde_json::json!({
            "prorated_total": total.to_string(),
            "deductions": deductions.to_string()
        }),
        output: serde_json::json!({ "ratio": ratio.to_string() }),
        reasoning: format!(
            "({} - {}) / {} = {} (display only)",
            total.round_dp(2),
            deductions.round_dp(2),
            total.round_dp(2),
            ratio.round_dp(4)
        ),
    };

    (ratio, audit_step)
}

/// Floors every component at zero.
fn clamp_components(components: &PayComponents, step_number: u32) -> (PayComponents, AuditStep) {
    let clamped = components.clamped();
    let floored: Vec<&str> = components
        .entries()
        .iter()
        .filter(|(_, amount)| *amount < Decimal::ZERO)
        .map(|(name, _)| *name)
        .collect();

    let reasoning = if floored.is_empty() {
        "No component fell below zero".to_string()
    } else {
        format!("Floored at zero: {}", floored.join(", "))
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "clamp".to_string(),
        rule_name: "Clamp At Zero".to_string(),
        input: serde_json::json!({ "total": components.total().to_string() }),
        output: serde_json::json!({
            "floored": floored,
            "total": clamped.total().to_string()
        }),
        reasoning,
    };

    (clamped, audit_step)
}

/// Counts weekday ABSENCE and UNPAID_HOLIDAY records.
pub fn count_days(records: &[NormalizedRecord], calendar: &HolidayCalendar) -> DayCounts {
    records
        .iter()
        .filter(|r| calendar.is_weekday(r.record.date))
        .fold(DayCounts::default(), |mut counts, r| {
            match r.record.status {
                WorkStatus::Absence => {
                    counts.unpaid_days += 1;
                    counts.unauthorized_absence_days += 1;
                }
                WorkStatus::UnpaidHoliday => counts.unpaid_days += 1,
                WorkStatus::Normal | WorkStatus::PaidHoliday => {}
            }
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{Contract, Employee, PayPeriod};
    use chrono::NaiveTime;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn config() -> PayrollConfig {
        ConfigLoader::builtin().config().clone()
    }

    fn employee(hire_date: Option<&str>) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Kim Minji".to_string(),
            annual_salary: 36_000_000,
            hire_date: hire_date.map(make_date),
            department: None,
            position: None,
        }
    }

    fn contract() -> Contract {
        Contract {
            basic_salary: 2_500_000,
            fixed_overtime_allowance: 300_000,
            ..Contract::default()
        }
    }

    fn full_contract() -> Contract {
        Contract {
            basic_salary: 2_500_000,
            fixed_overtime_allowance: 300_000,
            bonus: 100_000,
            other_allowance: 50_000,
            meal_allowance: 200_000,
            vehicle_maintenance_fee: 200_000,
            research_expense: 100_000,
            childcare_allowance: 100_000,
        }
    }

    fn worked_day(date: NaiveDate) -> DailyRecord {
        DailyRecord {
            date,
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(18, 0, 0),
            status: WorkStatus::Normal,
        }
    }

    fn january() -> PayPeriod {
        PayPeriod::new(2026, 1).unwrap()
    }

    /// Every calendar weekday of January 2026 worked 09:00-18:00.
    fn full_month() -> Vec<DailyRecord> {
        config()
            .holidays()
            .weekdays_in(january())
            .into_iter()
            .map(worked_day)
            .collect()
    }

    fn with_status(mut records: Vec<DailyRecord>, date: &str, status: WorkStatus) -> Vec<DailyRecord> {
        let date = make_date(date);
        for record in records.iter_mut().filter(|r| r.date == date) {
            *record = DailyRecord {
                status,
                ..DailyRecord::empty(date)
            };
        }
        records
    }

    fn run(context: &CalculationContext) -> PayResult {
        compute(context, &config()).unwrap()
    }

    #[test]
    fn test_full_month_pays_contract_exactly() {
        let context = CalculationContext::new(employee(None), full_contract(), january(), full_month());
        let result = run(&context);

        assert_eq!(result.total_shortfall_minutes, 0);
        assert_eq!(result.weekly_penalty, Decimal::ZERO);
        assert_eq!(result.overtime_premium, Decimal::ZERO);
        for ((name, amount), (_, contractual)) in result
            .final_pay
            .entries()
            .iter()
            .filter(|(name, _)| *name != "additional_overtime_premium")
            .zip(full_contract().components().iter())
        {
            assert_eq!(*amount, Decimal::from(*contractual), "component {}", name);
        }
        assert!(result.audit_trace.warnings.is_empty());
        assert_eq!(result.attendance_ratio, Decimal::ONE);
    }

    #[test]
    fn test_single_monday_absence_scenario() {
        let records = with_status(full_month(), "2026-01-12", WorkStatus::Absence);
        let context = CalculationContext::new(employee(None), contract(), january(), records);
        let result = run(&context);

        assert_eq!(result.total_shortfall_minutes, 480);
        assert_eq!(result.ordinary_hourly_rate.round_dp(2), dec("13392.86"));
        assert_eq!(result.shortfall_deduction.round_dp(2), dec("107142.86"));
        assert_eq!(result.weekly_penalty.round_dp(2), dec("107142.86"));
        assert_eq!(result.penalised_weeks.len(), 1);

        // basic bears 2.5/2.8 of the deduction plus the whole penalty
        assert_eq!(result.deduction_shares.basic_salary.round_dp(3), dec("95663.265"));
        assert_eq!(result.final_pay.basic_salary.round_dp(2), dec("2297193.88"));
        assert_eq!(result.final_pay.fixed_overtime_allowance.round_dp(2), dec("288520.41"));
        assert_eq!(result.day_counts.unpaid_days, 1);
        assert_eq!(result.day_counts.unauthorized_absence_days, 1);
    }

    #[test]
    fn test_unpaid_holiday_has_shortfall_but_no_penalty() {
        let records = with_status(full_month(), "2026-01-12", WorkStatus::UnpaidHoliday);
        let result = run(&CalculationContext::new(employee(None), contract(), january(), records));

        assert_eq!(result.total_shortfall_minutes, 480);
        assert_eq!(result.weekly_penalty, Decimal::ZERO);
        assert_eq!(result.day_counts.unpaid_days, 1);
        assert_eq!(result.day_counts.unauthorized_absence_days, 0);
    }

    #[test]
    fn test_missing_weekdays_filled_in_as_shortfall() {
        let mut records = full_month();
        records.retain(|r| r.date != make_date("2026-01-13"));
        let result = run(&CalculationContext::new(employee(None), contract(), january(), records));

        assert_eq!(result.total_shortfall_minutes, 480);
        assert_eq!(result.weekly_penalty, Decimal::ZERO);
        assert_eq!(result.records.len(), 21);
        assert_eq!(result.audit_trace.warnings[0].code, "MISSING_WEEKDAY_RECORD");
    }

    #[test]
    fn test_records_outside_period_ignored_with_warning() {
        let mut records = full_month();
        records.push(DailyRecord {
            status: WorkStatus::Absence,
            ..DailyRecord::empty(make_date("2026-02-02"))
        });
        let result = run(&CalculationContext::new(employee(None), contract(), january(), records));

        assert_eq!(result.total_shortfall_minutes, 0);
        assert_eq!(result.audit_trace.warnings[0].code, "RECORD_OUTSIDE_PERIOD");
    }

    #[test]
    fn test_mid_month_hire_only_fills_from_hire_date() {
        let hired = make_date("2026-01-15");
        let records: Vec<DailyRecord> = full_month().into_iter().filter(|r| r.date >= hired).collect();
        let result = run(&CalculationContext::new(
            employee(Some("2026-01-15")),
            contract(),
            january(),
            records,
        ));

        assert_eq!(result.hire_proration_ratio, Decimal::from(17) / Decimal::from(31));
        assert_eq!(result.total_shortfall_minutes, 0);
        assert_eq!(
            result.final_pay.basic_salary.round_dp(2),
            (Decimal::from(2_500_000) * Decimal::from(17) / Decimal::from(31)).round_dp(2)
        );
    }

    #[test]
    fn test_saturday_work_earns_premium_beyond_fixed_block() {
        let mut records = full_month();
        for day in ["2026-01-03", "2026-01-10"] {
            records.push(worked_day(make_date(day)));
        }
        let result = run(&CalculationContext::new(employee(None), contract(), january(), records));

        assert_eq!(result.premium_eligible_minutes, 960);
        assert_eq!(result.paid_premium_minutes, 360);
        // 13392.857... x 6 x 1.5
        assert_eq!(result.overtime_premium.round_dp(2), dec("120535.71"));
        assert_eq!(result.final_pay.additional_overtime_premium, result.overtime_premium);
    }

    #[test]
    fn test_percentage_over_hundred_adds_excess_to_other_allowance() {
        let context = CalculationContext::new(employee(None), full_contract(), january(), full_month())
            .with_salary_percentage(dec("150"));
        let result = run(&context);

        assert_eq!(result.percentage_excess, dec("1775000"));
        assert_eq!(result.final_pay.other_allowance, dec("1825000"));
        assert_eq!(result.final_pay.basic_salary, dec("2500000"));
    }

    #[test]
    fn test_ad_hoc_bonus_scaled_only_at_or_below_hundred() {
        let base = CalculationContext::new(employee(None), full_contract(), january(), full_month())
            .with_ad_hoc_bonus(Some(200_000));

        let reduced = run(&base.clone().with_salary_percentage(dec("50")));
        assert_eq!(reduced.final_pay.bonus, dec("150000"));

        let boosted = run(&base.with_salary_percentage(dec("120")));
        assert_eq!(boosted.final_pay.bonus, dec("300000"));
    }

    #[test]
    fn test_heavy_absence_clamps_at_zero() {
        let records: Vec<DailyRecord> = full_month()
            .into_iter()
            .map(|r| DailyRecord {
                status: WorkStatus::Absence,
                ..DailyRecord::empty(r.date)
            })
            .collect();
        let result = run(&CalculationContext::new(employee(None), contract(), january(), records));

        assert!(result.interim.basic_salary < Decimal::ZERO);
        assert_eq!(result.final_pay.basic_salary, Decimal::ZERO);
        assert!(result.attendance_ratio < dec("0.01"));
        assert!(result.audit_trace.step("clamp").unwrap().reasoning.contains("basic_salary"));
        assert_eq!(result.day_counts.unauthorized_absence_days, 21);
    }

    #[test]
    fn test_negative_percentage_rejected() {
        let context = CalculationContext::new(employee(None), contract(), january(), full_month())
            .with_salary_percentage(dec("-1"));
        assert!(matches!(
            compute(&context, &config()),
            Err(crate::error::EngineError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_near_limit_amounts_compute_without_overflow() {
        let employee = Employee {
            annual_salary: 9_000_000_000_000_000_000,
            ..employee(None)
        };
        let contract = Contract {
            basic_salary: 9_000_000_000_000_000_000,
            meal_allowance: 1,
            ..Contract::default()
        };
        let result = run(&CalculationContext::new(employee, contract, january(), Vec::new()));

        assert_eq!(result.total_shortfall_minutes, 21 * 480);
        assert!(result.final_pay.basic_salary > Decimal::ZERO);
        assert!(result.final_pay.basic_salary < dec("9000000000000000000"));
    }

    #[test]
    fn test_audit_trace_has_every_step_in_order() {
        let result = run(&CalculationContext::new(employee(None), contract(), january(), full_month()));
        let rule_ids: Vec<&str> = result.audit_trace.steps.iter().map(|s| s.rule_id.as_str()).collect();

        assert_eq!(
            rule_ids,
            vec![
                "hire_proration",
                "ordinary_rate",
                "shortfall",
                "weekly_penalty",
                "overtime_premium",
                "deduction_distribution",
                "interim_components",
                "attendance_ratio",
                "salary_percentage",
                "clamp",
            ]
        );
        for (index, step) in result.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number as usize, index + 1);
        }
    }

    proptest! {
        #[test]
        fn prop_result_independent_of_record_order(
            seed in any::<u64>(),
            absent in proptest::collection::vec(0usize..21, 0..5),
        ) {
            let mut records = full_month();
            for index in absent {
                let date = records[index].date;
                records[index] = DailyRecord { status: WorkStatus::Absence, ..DailyRecord::empty(date) };
            }
            let mut shuffled = records.clone();
            // deterministic rotation + reverse driven by the seed
            let len = shuffled.len();
            shuffled.rotate_left((seed as usize) % len);
            if seed % 2 == 0 {
                shuffled.reverse();
            }

            let ordered = run(&CalculationContext::new(employee(None), full_contract(), january(), records));
            let reordered = run(&CalculationContext::new(employee(None), full_contract(), january(), shuffled));

            prop_assert_eq!(ordered.final_pay, reordered.final_pay);
            prop_assert_eq!(ordered.total_shortfall_minutes, reordered.total_shortfall_minutes);
            prop_assert_eq!(ordered.penalised_weeks, reordered.penalised_weeks);
        }

        #[test]
        fn prop_final_components_never_negative(
            absences in 0usize..21,
            pct in 0u32..200,
        ) {
            let records: Vec<DailyRecord> = full_month()
                .into_iter()
                .enumerate()
                .map(|(i, r)| if i < absences {
                    DailyRecord { status: WorkStatus::Absence, ..DailyRecord::empty(r.date) }
                } else {
                    r
                })
                .collect();
            let context = CalculationContext::new(employee(None), full_contract(), january(), records)
                .with_salary_percentage(Decimal::from(pct));
            let result = run(&context);

            for (name, amount) in result.final_pay.entries() {
                prop_assert!(amount >= Decimal::ZERO, "{} was {}", name, amount);
            }
        }
    }
}
