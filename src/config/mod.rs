//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load the payroll policy and the
//! holiday table from YAML files, with built-in defaults for both.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll").unwrap();
//! println!("Monthly hours: {}", config.policy().monthly_standard_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BreakRules, FIXED_OVERTIME_MINUTES, HolidayEntry, HolidaysConfig, MONTHLY_STANDARD_HOURS,
    NightWindow, OvertimePolicy, PREMIUM_MULTIPLIER, PayrollConfig, PayrollPolicy,
    STANDARD_DAILY_MINUTES, WEEKLY_HOLIDAY_ALLOWANCE_HOURS,
};
