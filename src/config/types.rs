//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::HolidayCalendar;

/// Minutes in a standard working day.
pub const STANDARD_DAILY_MINUTES: i64 = 480;

/// Standard monthly hours used as the ordinary-rate denominator.
pub const MONTHLY_STANDARD_HOURS: Decimal = Decimal::from_parts(224, 0, 0, false, 0);

/// Overtime minutes already paid for by the fixed overtime allowance.
pub const FIXED_OVERTIME_MINUTES: i64 = 600;

/// Multiplier applied to premium-eligible overtime.
pub const PREMIUM_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Hours of weekly holiday allowance forfeited per week with an absence.
pub const WEEKLY_HOLIDAY_ALLOWANCE_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Unpaid break policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRules {
    /// Every full block of non-night minutes earns one break.
    pub block_minutes: i64,
    /// Break length per full block.
    pub break_per_block_minutes: i64,
    /// Non-night minutes at or above which the minimum break applies.
    pub long_shift_minutes: i64,
    /// Minimum break for long shifts.
    pub long_shift_minimum_break_minutes: i64,
}

impl Default for BreakRules {
    fn default() -> Self {
        Self {
            block_minutes: 240,
            break_per_block_minutes: 30,
            long_shift_minutes: 480,
            long_shift_minimum_break_minutes: 60,
        }
    }
}

/// The night window, `[start, 24:00) ∪ [00:00, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightWindow {
    /// Time the night window opens.
    pub start: NaiveTime,
    /// Time the night window closes on the following morning.
    pub end: NaiveTime,
}

impl Default for NightWindow {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

/// Additional overtime premium policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimePolicy {
    /// Eligible minutes covered by the fixed overtime allowance.
    pub fixed_overtime_minutes: i64,
    /// Multiplier applied to the excess.
    pub premium_multiplier: Decimal,
}

impl Default for OvertimePolicy {
    fn default() -> Self {
        Self {
            fixed_overtime_minutes: FIXED_OVERTIME_MINUTES,
            premium_multiplier: PREMIUM_MULTIPLIER,
        }
    }
}

/// Payroll policy constants, loaded from `policy.yaml`.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollPolicy;
///
/// let policy = PayrollPolicy::default();
/// assert_eq!(policy.standard_daily_minutes, 480);
/// assert_eq!(policy.monthly_standard_hours.to_string(), "224");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPolicy {
    /// Minutes in a standard working day.
    pub standard_daily_minutes: i64,
    /// Standard monthly hours (ordinary-rate denominator).
    pub monthly_standard_hours: Decimal,
    /// Weekly holiday allowance hours forfeited per penalised week.
    pub weekly_holiday_allowance_hours: Decimal,
    /// Unpaid break policy.
    #[serde(default)]
    pub break_rules: BreakRules,
    /// Night window.
    #[serde(default)]
    pub night_window: NightWindow,
    /// Overtime premium policy.
    #[serde(default)]
    pub overtime: OvertimePolicy,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            standard_daily_minutes: STANDARD_DAILY_MINUTES,
            monthly_standard_hours: MONTHLY_STANDARD_HOURS,
            weekly_holiday_allowance_hours: WEEKLY_HOLIDAY_ALLOWANCE_HOURS,
            break_rules: BreakRules::default(),
            night_window: NightWindow::default(),
            overtime: OvertimePolicy::default(),
        }
    }
}

impl PayrollPolicy {
    /// Checks internal consistency; returns a description of the first problem.
    pub fn validate(&self) -> Result<(), String> {
        if self.standard_daily_minutes <= 0 {
            return Err("standard_daily_minutes must be positive".to_string());
        }
        if self.monthly_standard_hours <= Decimal::ZERO {
            return Err("monthly_standard_hours must be positive".to_string());
        }
        if self.break_rules.block_minutes <= 0 {
            return Err("break_rules.block_minutes must be positive".to_string());
        }
        if self.night_window.end >= self.night_window.start {
            return Err("night_window.end must be before night_window.start".to_string());
        }
        if self.overtime.fixed_overtime_minutes < 0 {
            return Err("overtime.fixed_overtime_minutes must not be negative".to_string());
        }
        Ok(())
    }
}

/// A holiday as written in `holidays.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    /// Month (1-12).
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// Holiday name.
    pub name: String,
}

/// Holiday table file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidaysConfig {
    /// Holidays observed on the same date every year.
    pub fixed: Vec<HolidayEntry>,
    /// Extra holidays for specific years (lunar dates, substitute and temporary holidays).
    #[serde(default)]
    pub years: BTreeMap<i32, Vec<HolidayEntry>>,
}

/// The complete payroll configuration.
#[derive(Debug, Clone, Default)]
pub struct PayrollConfig {
    policy: PayrollPolicy,
    holidays: HolidayCalendar,
}

impl PayrollConfig {
    /// Creates a PayrollConfig from its component parts.
    pub fn new(policy: PayrollPolicy, holidays: HolidayCalendar) -> Self {
        Self { policy, holidays }
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        assert!(PayrollPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_default_constants() {
        let policy = PayrollPolicy::default();
        assert_eq!(policy.overtime.fixed_overtime_minutes, 600);
        assert_eq!(policy.overtime.premium_multiplier.to_string(), "1.5");
        assert_eq!(policy.weekly_holiday_allowance_hours, Decimal::from(8));
        assert_eq!(policy.break_rules.break_per_block_minutes, 30);
    }

    #[test]
    fn test_inverted_night_window_is_invalid() {
        let mut policy = PayrollPolicy::default();
        policy.night_window.end = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_policy_yaml_with_defaults_for_nested_sections() {
        let yaml = r#"
standard_daily_minutes: 480
monthly_standard_hours: "209"
weekly_holiday_allowance_hours: "8"
"#;
        let policy: PayrollPolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.monthly_standard_hours, Decimal::from(209));
        assert_eq!(policy.break_rules, BreakRules::default());
        assert_eq!(policy.night_window, NightWindow::default());
    }

    #[test]
    fn test_holidays_yaml_parses_year_keys() {
        let yaml = r#"
fixed:
  - { month: 1, day: 1, name: "New Year's Day" }
years:
  2026:
    - { month: 2, day: 17, name: "Seollal" }
"#;
        let config: HolidaysConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.fixed.len(), 1);
        assert_eq!(config.years[&2026][0].day, 17);
    }
}
