//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the `/calculate` and
//! `/commit` endpoints, and how a request is resolved into a
//! [`CalculationContext`] against the store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    CalculationContext, DEFAULT_SALARY_PERCENTAGE, PayPeriod, RawDailyEntry, parse_records,
};
use crate::store::PayrollStore;

/// Request body for the `/calculate` endpoint.
///
/// When `records` is omitted the month's stored work log is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee to calculate.
    pub employee_id: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// The month's daily records as edited by the operator.
    #[serde(default)]
    pub records: Option<Vec<RawDailyEntry>>,
    /// Salary percentage (defaults to 100).
    #[serde(default)]
    pub salary_percentage: Option<Decimal>,
    /// One-off bonus for the month.
    #[serde(default)]
    pub ad_hoc_bonus: Option<i64>,
}

impl CalculationRequest {
    /// The requested pay period.
    pub fn period(&self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.year, self.month)
    }

    /// Builds the calculation input from this request and the store.
    ///
    /// Fails with `InvalidParameter` for a bad period, `EmployeeNotFound` or
    /// `ContractNotFound` for missing prerequisites and `InvalidRecord` for
    /// the first unparseable row.
    pub fn resolve(&self, store: &dyn PayrollStore) -> EngineResult<CalculationContext> {
        let period = self.period()?;
        let employee = store.employee(&self.employee_id)?;
        let contract = store.contract_baseline(&self.employee_id)?;
        let records = match &self.records {
            Some(entries) => parse_records(entries)?,
            None => store.work_log(&self.employee_id, period)?,
        };

        Ok(CalculationContext::new(employee, contract, period, records)
            .with_salary_percentage(self.salary_percentage.unwrap_or(DEFAULT_SALARY_PERCENTAGE))
            .with_ad_hoc_bonus(self.ad_hoc_bonus))
    }
}

/// Request body for the `/commit` endpoint.
///
/// `request` must be the same request that produced `calculation_id`; it is
/// resolved again and compared with what the calculation saw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRequest {
    /// The id returned by `/calculate`.
    pub calculation_id: Uuid,
    /// The original calculation request.
    pub request: CalculationRequest,
}
