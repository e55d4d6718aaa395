//! Persisted monthly pay record.
//!
//! A [`MonthlyPayRecord`] is the finalized, integer form of a [`PayResult`],
//! keyed by employee and month. Rounding to whole currency units happens
//! exactly once, here or at render time.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{PayPeriod, PayResult};

/// Rounds half-up to a whole currency unit.
///
/// # Example
///
/// ```
/// use payroll_engine::models::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("107142.5").unwrap()), 107143);
/// assert_eq!(round_currency(Decimal::from_str("107142.49").unwrap()), 107142);
/// ```
pub fn round_currency(amount: Decimal) -> i64 {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(if amount.is_sign_negative() { i64::MIN } else { i64::MAX })
}

/// The finalized pay for one employee and month, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayRecord {
    /// The employee paid.
    pub employee_id: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month.
    pub month: u32,
    /// Basic salary.
    pub basic_salary: i64,
    /// Fixed overtime allowance.
    pub fixed_overtime_allowance: i64,
    /// Additional overtime premium.
    pub additional_overtime_premium: i64,
    /// Bonus.
    pub bonus: i64,
    /// Other allowance.
    pub other_allowance: i64,
    /// Meal allowance.
    pub meal_allowance: i64,
    /// Vehicle maintenance fee.
    pub vehicle_maintenance_fee: i64,
    /// Research and development expense.
    pub research_expense: i64,
    /// Childcare allowance.
    pub childcare_allowance: i64,
    /// Weekday ABSENCE or UNPAID_HOLIDAY count.
    pub unpaid_days: u32,
    /// Weekday ABSENCE count.
    pub unauthorized_absence_days: u32,
}

impl MonthlyPayRecord {
    /// Rounds the final components of `result`.
    pub fn from_result(result: &PayResult) -> Self {
        let pay = &result.final_pay;
        Self {
            employee_id: result.employee_id.clone(),
            year: result.period.year(),
            month: result.period.month(),
            basic_salary: round_currency(pay.basic_salary),
            fixed_overtime_allowance: round_currency(pay.fixed_overtime_allowance),
            additional_overtime_premium: round_currency(pay.additional_overtime_premium),
            bonus: round_currency(pay.bonus),
            other_allowance: round_currency(pay.other_allowance),
            meal_allowance: round_currency(pay.meal_allowance),
            vehicle_maintenance_fee: round_currency(pay.vehicle_maintenance_fee),
            research_expense: round_currency(pay.research_expense),
            childcare_allowance: round_currency(pay.childcare_allowance),
            unpaid_days: result.day_counts.unpaid_days,
            unauthorized_absence_days: result.day_counts.unauthorized_absence_days,
        }
    }

    /// The month this record belongs to.
    pub fn period(&self) -> Option<PayPeriod> {
        PayPeriod::new(self.year, self.month).ok()
    }

    /// Returns each amount paired with its field name, in display order.
    pub fn amounts(&self) -> [(&'static str, i64); 9] {
        [
            ("basic_salary", self.basic_salary),
            ("fixed_overtime_allowance", self.fixed_overtime_allowance),
            ("additional_overtime_premium", self.additional_overtime_premium),
            ("bonus", self.bonus),
            ("other_allowance", self.other_allowance),
            ("meal_allowance", self.meal_allowance),
            ("vehicle_maintenance_fee", self.vehicle_maintenance_fee),
            ("research_expense", self.research_expense),
            ("childcare_allowance", self.childcare_allowance),
        ]
    }

    /// Sum of the nine rounded amounts.
    pub fn total(&self) -> i64 {
        self.amounts()
            .iter()
            .fold(0i64, |total, (_, amount)| total.saturating_add(*amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_currency_half_up() {
        assert_eq!(round_currency(dec("0.5")), 1);
        assert_eq!(round_currency(dec("1.4999")), 1);
        assert_eq!(round_currency(dec("2297193.8775")), 2297194);
        assert_eq!(round_currency(Decimal::ZERO), 0);
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let record = MonthlyPayRecord {
            employee_id: "emp_001".to_string(),
            year: 2026,
            month: 1,
            basic_salary: 2_297_194,
            fixed_overtime_allowance: 288_520,
            additional_overtime_premium: 0,
            bonus: 0,
            other_allowance: 0,
            meal_allowance: 0,
            vehicle_maintenance_fee: 0,
            research_expense: 0,
            childcare_allowance: 0,
            unpaid_days: 1,
            unauthorized_absence_days: 1,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: MonthlyPayRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
        assert_eq!(record.total(), 2_585_714);
        assert_eq!(record.period(), PayPeriod::new(2026, 1).ok());
    }
}
