//! Calculation logic for the payroll engine.
//!
//! This module contains the holiday calendar, day classification, the work
//! record normalizer, one function per payroll adjustment step (hire
//! proration, ordinary rate, shortfall, weekly penalty, overtime premium,
//! deduction distribution and salary percentage) and the [`compute`]
//! orchestrator that runs them in order.

mod day_detection;
mod deduction_distribution;
mod engine;
mod hire_proration;
mod holidays;
mod ordinary_rate;
mod overtime_premium;
mod salary_percentage;
mod shortfall;
mod weekly_penalty;
mod work_minutes;

pub use day_detection::{DayType, get_day_type};
pub use deduction_distribution::{DeductionDistributionResult, distribute_deduction};
pub use engine::{compute, count_days};
pub use hire_proration::{HireProrationResult, calculate_hire_proration, hire_proration_ratio};
pub use holidays::HolidayCalendar;
pub use ordinary_rate::{OrdinaryRateResult, calculate_ordinary_rate};
pub use overtime_premium::{
    OvertimePremiumResult, calculate_overtime_premium, eligible_minutes, is_holiday_worked,
};
pub use salary_percentage::{SalaryPercentageResult, apply_salary_percentage};
pub use shortfall::{ShortfallResult, calculate_shortfall, shortfall_minutes};
pub use weekly_penalty::{WeeklyPenaltyResult, calculate_weekly_penalty, iso_week_key};
pub use work_minutes::{WorkMinutes, calculate_work_minutes, normalize_record};
