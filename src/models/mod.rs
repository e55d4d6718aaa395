//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod context;
mod contract;
mod daily_record;
mod employee;
mod monthly_pay;
mod pay_period;
mod pay_result;

pub use context::{CalculationContext, DEFAULT_SALARY_PERCENTAGE};
pub use contract::Contract;
pub use daily_record::{DailyRecord, NormalizedRecord, RawDailyEntry, WorkStatus, parse_records};
pub use employee::Employee;
pub use monthly_pay::{MonthlyPayRecord, round_currency};
pub use pay_period::PayPeriod;
pub use pay_result::{
    AuditStep, AuditTrace, AuditWarning, DayCounts, DeductionShares, IsoWeekKey, PayComponents,
    PayResult, ProratedContract,
};
