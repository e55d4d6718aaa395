//! Calculation context: the single input of the payroll engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{Contract, DailyRecord, Employee, PayPeriod};

/// Default salary percentage: pay the month at 100%.
pub const DEFAULT_SALARY_PERCENTAGE: Decimal = Decimal::ONE_HUNDRED;

/// Everything one calculation run reads, captured as an owned snapshot.
///
/// The records are copied in when the context is built, so later edits to
/// the caller's work-log table cannot change a run in progress.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalculationContext {
    /// The employee being paid.
    pub employee: Employee,
    /// The employee's contract baseline.
    pub contract: Contract,
    /// The month being calculated.
    pub period: PayPeriod,
    /// The month's daily records.
    pub records: Vec<DailyRecord>,
    /// Salary percentage multiplier (100 = full pay, may exceed 100).
    pub salary_percentage: Decimal,
    /// Operator-entered one-off bonus for the month.
    pub ad_hoc_bonus: Option<i64>,
}

impl CalculationContext {
    /// Builds a context at 100% with no ad-hoc bonus.
    pub fn new(
        employee: Employee,
        contract: Contract,
        period: PayPeriod,
        records: Vec<DailyRecord>,
    ) -> Self {
        Self {
            employee,
            contract,
            period,
            records,
            salary_percentage: DEFAULT_SALARY_PERCENTAGE,
            ad_hoc_bonus: None,
        }
    }

    /// Sets the salary percentage.
    pub fn with_salary_percentage(mut self, salary_percentage: Decimal) -> Self {
        self.salary_percentage = salary_percentage;
        self
    }

    /// Sets the ad-hoc bonus.
    pub fn with_ad_hoc_bonus(mut self, ad_hoc_bonus: Option<i64>) -> Self {
        self.ad_hoc_bonus = ad_hoc_bonus;
        self
    }

    /// Checks the override knobs and the contract before a run.
    pub fn validate(&self) -> EngineResult<()> {
        if self.salary_percentage < Decimal::ZERO {
            return Err(EngineError::InvalidParameter {
                field: "salary_percentage".to_string(),
                message: format!("must not be negative, got {}", self.salary_percentage),
            });
        }
        if let Some(bonus) = self.ad_hoc_bonus.filter(|bonus| *bonus < 0) {
            return Err(EngineError::InvalidParameter {
                field: "ad_hoc_bonus".to_string(),
                message: format!("must not be negative, got {}", bonus),
            });
        }
        self.contract.validate()
    }
}
