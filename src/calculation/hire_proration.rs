//! Hire date proration.
//!
//! An employee hired part-way through the target month is paid for the
//! days from the hire date to month end, inclusive.

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::models::{AuditStep, Contract, Employee, PayPeriod, ProratedContract};

/// The result of hire proration, including the ratio and audit step.
#[derive(Debug, Clone)]
pub struct HireProrationResult {
    /// Fraction of the month employed, in `(0, 1]`.
    pub ratio: Decimal,
    /// Contract components multiplied by the ratio.
    pub prorated: ProratedContract,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the hire proration ratio for a period.
///
/// The ratio is 1 unless the hire date falls inside `period` on a day other
/// than the 1st, in which case it is
/// `(days_in_month - hire_day + 1) / days_in_month`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::hire_proration_ratio;
/// use payroll_engine::models::{Employee, PayPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Kim".to_string(),
///     annual_salary: 36_000_000,
///     hire_date: NaiveDate::from_ymd_opt(2026, 1, 15),
///     department: None,
///     position: None,
/// };
/// let period = PayPeriod::new(2026, 1).unwrap();
///
/// assert_eq!(hire_proration_ratio(&employee, period), Decimal::from(17) / Decimal::from(31));
/// ```
pub fn hire_proration_ratio(employee: &Employee, period: PayPeriod) -> Decimal {
    match employee.mid_month_hire_date(period) {
        Some(hire_date) => {
            let days_in_month = period.days_in_month();
            let employed_days = days_in_month - hire_date.day() + 1;
            Decimal::from(employed_days) / Decimal::from(days_in_month)
        }
        None => Decimal::ONE,
    }
}

/// Prorates every contract component by the hire ratio.
pub fn calculate_hire_proration(
    employee: &Employee,
    contract: &Contract,
    period: PayPeriod,
    step_number: u32,
) -> HireProrationResult {
    let ratio = hire_proration_ratio(employee, period);
    let prorated = ProratedContract::from_contract(contract, ratio);

    let reasoning = match employee.mid_month_hire_date(period) {
        Some(hire_date) => format!(
            "Hired on {} within {}: contract prorated by {} ({} of {} days)",
            hire_date,
            period,
            ratio.round_dp(6),
            period.days_in_month() - hire_date.day() + 1,
            period.days_in_month()
        ),
        None => format!("No mid-month hire in {}: full month applies", period),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "hire_proration".to_string(),
        rule_name: "Hire Date Proration".to_string(),
        input: serde_json::json!({
            "hire_date": employee.hire_date.map(|d| d.to_string()),
            "period": period.to_string(),
            "contract_total": contract.total()
        }),
        output: serde_json::json!({
            "ratio": ratio.to_string(),
            "prorated_total": prorated.total().to_string()
        }),
        reasoning,
    };

    HireProrationResult {
        ratio,
        prorated,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn employee_hired(hire_date: Option<&str>) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Test Employee".to_string(),
            annual_salary: 36_000_000,
            hire_date: hire_date.map(make_date),
            department: None,
            position: None,
        }
    }

    fn contract() -> Contract {
        Contract {
            basic_salary: 3_100_000,
            meal_allowance: 310_000,
            ..Contract::default()
        }
    }

    #[test]
    fn test_no_hire_date_is_full_month() {
        let period = PayPeriod::new(2026, 1).unwrap();
        assert_eq!(hire_proration_ratio(&employee_hired(None), period), Decimal::ONE);
    }

    #[test]
    fn test_hire_on_first_is_full_month() {
        let period = PayPeriod::new(2026, 1).unwrap();
        let employee = employee_hired(Some("2026-01-01"));
        assert_eq!(hire_proration_ratio(&employee, period), Decimal::ONE);
    }

    #[test]
    fn test_hire_in_other_month_is_full_month() {
        let period = PayPeriod::new(2026, 3).unwrap();
        for hire in ["2025-03-15", "2026-02-20", "2026-04-10"] {
            let employee = employee_hired(Some(hire));
            assert_eq!(hire_proration_ratio(&employee, period), Decimal::ONE, "hire {}", hire);
        }
    }

    #[test]
    fn test_hire_on_last_day_pays_one_day() {
        let period = PayPeriod::new(2026, 2).unwrap();
        let employee = employee_hired(Some("2026-02-28"));
        assert_eq!(
            hire_proration_ratio(&employee, period),
            Decimal::ONE / Decimal::from(28)
        );
    }

    #[test]
    fn test_mid_month_hire_prorates_components() {
        let period = PayPeriod::new(2026, 1).unwrap();
        let result =
            calculate_hire_proration(&employee_hired(Some("2026-01-15")), &contract(), period, 1);

        // 17 of 31 days
        assert_eq!(result.prorated.basic_salary.round_dp(6), Decimal::from(1_700_000));
        assert_eq!(result.prorated.meal_allowance.round_dp(6), Decimal::from(170_000));
        assert_eq!(result.prorated.bonus, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_records_ratio() {
        let period = PayPeriod::new(2026, 1).unwrap();
        let result = calculate_hire_proration(&employee_hired(None), &contract(), period, 1);

        assert_eq!(result.audit_step.rule_id, "hire_proration");
        assert_eq!(result.audit_step.step_number, 1);
        assert_eq!(result.audit_step.output["ratio"], "1");
        assert!(result.audit_step.reasoning.contains("full month"));
    }
}
