//! Calculation result models for the payroll engine.
//!
//! This module contains the [`PayResult`] type and the structures it is built
//! from: prorated contract figures, the nine pay components, the shortfall
//! distribution, day counts and the audit trace explaining each step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Contract, NormalizedRecord, PayPeriod};

/// The eight contract components after hire proration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProratedContract {
    /// Basic salary.
    pub basic_salary: Decimal,
    /// Fixed overtime allowance.
    pub fixed_overtime_allowance: Decimal,
    /// Contractual bonus.
    pub bonus: Decimal,
    /// Other allowance.
    pub other_allowance: Decimal,
    /// Meal allowance.
    pub meal_allowance: Decimal,
    /// Vehicle maintenance fee.
    pub vehicle_maintenance_fee: Decimal,
    /// Research and development expense.
    pub research_expense: Decimal,
    /// Childcare allowance.
    pub childcare_allowance: Decimal,
}

impl ProratedContract {
    /// Multiplies every contract component by `ratio`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{Contract, ProratedContract};
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let contract = Contract { basic_salary: 3_000_000, ..Contract::default() };
    /// let prorated = ProratedContract::from_contract(&contract, Decimal::from_str("0.5").unwrap());
    /// assert_eq!(prorated.basic_salary, Decimal::from(1_500_000));
    /// ```
    pub fn from_contract(contract: &Contract, ratio: Decimal) -> Self {
        let scale = |amount: i64| Decimal::from(amount) * ratio;
        Self {
            basic_salary: scale(contract.basic_salary),
            fixed_overtime_allowance: scale(contract.fixed_overtime_allowance),
            bonus: scale(contract.bonus),
            other_allowance: scale(contract.other_allowance),
            meal_allowance: scale(contract.meal_allowance),
            vehicle_maintenance_fee: scale(contract.vehicle_maintenance_fee),
            research_expense: scale(contract.research_expense),
            childcare_allowance: scale(contract.childcare_allowance),
        }
    }

    /// Sum of all eight components.
    pub fn total(&self) -> Decimal {
        self.basic_salary
            + self.fixed_overtime_allowance
            + self.bonus
            + self.other_allowance
            + self.meal_allowance
            + self.vehicle_maintenance_fee
            + self.research_expense
            + self.childcare_allowance
    }

    /// Sum of the six components the shortfall deduction is spread across.
    pub fn reducible_total(&self) -> Decimal {
        self.basic_salary
            + self.fixed_overtime_allowance
            + self.meal_allowance
            + self.childcare_allowance
            + self.vehicle_maintenance_fee
            + self.research_expense
    }
}

/// How the shortfall deduction was split across the reducible components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionShares {
    /// Share charged to basic salary.
    pub basic_salary: Decimal,
    /// Share charged to the fixed overtime allowance.
    pub fixed_overtime_allowance: Decimal,
    /// Share charged to the meal allowance.
    pub meal_allowance: Decimal,
    /// Share charged to the childcare allowance.
    pub childcare_allowance: Decimal,
    /// Share charged to the vehicle maintenance fee.
    pub vehicle_maintenance_fee: Decimal,
    /// Share charged to the research expense.
    pub research_expense: Decimal,
}

impl DeductionShares {
    /// Sum of all shares.
    pub fn total(&self) -> Decimal {
        self.basic_salary
            + self.fixed_overtime_allowance
            + self.meal_allowance
            + self.childcare_allowance
            + self.vehicle_maintenance_fee
            + self.research_expense
    }
}

/// The nine pay components paid out for a month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayComponents {
    /// Basic salary.
    pub basic_salary: Decimal,
    /// Fixed overtime allowance.
    pub fixed_overtime_allowance: Decimal,
    /// Premium for overtime beyond the fixed allowance.
    pub additional_overtime_premium: Decimal,
    /// Bonus, including any ad-hoc bonus.
    pub bonus: Decimal,
    /// Other allowance, including any salary-percentage excess.
    pub other_allowance: Decimal,
    /// Meal allowance.
    pub meal_allowance: Decimal,
    /// Vehicle maintenance fee.
    pub vehicle_maintenance_fee: Decimal,
    /// Research and development expense.
    pub research_expense: Decimal,
    /// Childcare allowance.
    pub childcare_allowance: Decimal,
}

impl PayComponents {
    /// Applies `f` to every component.
    pub fn map(&self, f: impl Fn(Decimal) -> Decimal) -> Self {
        Self {
            basic_salary: f(self.basic_salary),
            fixed_overtime_allowance: f(self.fixed_overtime_allowance),
            additional_overtime_premium: f(self.additional_overtime_premium),
            bonus: f(self.bonus),
            other_allowance: f(self.other_allowance),
            meal_allowance: f(self.meal_allowance),
            vehicle_maintenance_fee: f(self.vehicle_maintenance_fee),
            research_expense: f(self.research_expense),
            childcare_allowance: f(self.childcare_allowance),
        }
    }

    /// Floors every component at zero.
    pub fn clamped(&self) -> Self {
        self.map(|amount| amount.max(Decimal::ZERO))
    }

    /// Returns each component paired with its field name, in display order.
    pub fn entries(&self) -> [(&'static str, Decimal); 9] {
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

    /// Sum of all nine components.
    pub fn total(&self) -> Decimal {
        self.entries().iter().map(|(_, amount)| *amount).sum()
    }
}

/// An ISO week, identified by week-based year and week number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IsoWeekKey {
    /// The ISO week-based year.
    pub year: i32,
    /// The ISO week number (1-53).
    pub week: u32,
}

impl std::fmt::Display for IsoWeekKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// Weekday day counts persisted alongside the monthly pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCounts {
    /// Weekday ABSENCE or UNPAID_HOLIDAY records.
    pub unpaid_days: u32,
    /// Weekday ABSENCE records only.
    pub unauthorized_absence_days: u32,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Finds the first step recorded for `rule_id`.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|step| step.rule_id == rule_id)
    }
}

/// The complete result of one monthly payroll calculation.
///
/// Intermediate values that explain the final figures are kept alongside
/// them, so a caller can render or persist the result without recomputing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayResult {
    /// The employee the calculation is for.
    pub employee_id: String,
    /// The month calculated.
    pub period: PayPeriod,
    /// The contract baseline used.
    pub contract: Contract,
    /// Fraction of the month employed (1 unless hired mid-month).
    pub hire_proration_ratio: Decimal,
    /// Contract components after hire proration.
    pub prorated: ProratedContract,
    /// Annual salary / 12, after hire proration.
    pub monthly_equivalent: Decimal,
    /// Ordinary hourly rate (monthly equivalent / standard monthly hours).
    pub ordinary_hourly_rate: Decimal,
    /// Ordinary per-minute rate.
    pub minute_rate: Decimal,
    /// Minutes short of the standard day, summed over calendar weekdays.
    pub total_shortfall_minutes: i64,
    /// Shortfall minutes priced at the minute rate.
    pub shortfall_deduction: Decimal,
    /// Weeks that contain at least one weekday absence.
    pub penalised_weeks: Vec<IsoWeekKey>,
    /// Weekly holiday allowance forfeited for those weeks.
    pub weekly_penalty: Decimal,
    /// Minutes eligible for the additional overtime premium.
    pub premium_eligible_minutes: i64,
    /// Eligible minutes beyond the fixed overtime allowance.
    pub paid_premium_minutes: i64,
    /// Additional overtime premium before the salary percentage.
    pub overtime_premium: Decimal,
    /// How the shortfall deduction was split.
    pub deduction_shares: DeductionShares,
    /// Display-only attendance ratio.
    pub attendance_ratio: Decimal,
    /// The salary percentage applied.
    pub salary_percentage: Decimal,
    /// The ad-hoc bonus entered for the month, if any.
    pub ad_hoc_bonus: Option<i64>,
    /// Amount added to other allowance when the percentage exceeds 100.
    pub percentage_excess: Decimal,
    /// Components after deductions and premium, before the salary percentage.
    pub interim: PayComponents,
    /// Final components, floored at zero.
    pub final_pay: PayComponents,
    /// Weekday day counts.
    pub day_counts: DayCounts,
    /// The records as the engine saw them, including filled-in missing weekdays.
    pub records: Vec<NormalizedRecord>,
    /// Step-by-step explanation.
    pub audit_trace: AuditTrace,
}
