//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::HolidayCalendar;
use crate::error::{EngineError, EngineResult};

use super::types::{HolidaysConfig, PayrollConfig, PayrollPolicy};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/payroll/
/// ├── policy.yaml    # Daily minutes, rate denominator, breaks, overtime
/// └── holidays.yaml  # Fixed and year-specific holidays
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll").unwrap();
/// println!("Standard day: {} minutes", loader.policy().standard_daily_minutes);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, contains invalid YAML,
    /// or describes an inconsistent policy or an impossible holiday date.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_path = path.join("policy.yaml");
        let policy = Self::load_yaml::<PayrollPolicy>(&policy_path)?;
        policy
            .validate()
            .map_err(|message| EngineError::ConfigParseError {
                path: policy_path.display().to_string(),
                message,
            })?;

        let holidays_path = path.join("holidays.yaml");
        let holidays_config = Self::load_yaml::<HolidaysConfig>(&holidays_path)?;
        let holidays = HolidayCalendar::from_config(&holidays_config).map_err(|message| {
            EngineError::ConfigParseError {
                path: holidays_path.display().to_string(),
                message,
            }
        })?;

        Ok(Self {
            config: PayrollConfig::new(policy, holidays),
        })
    }

    /// Uses the built-in policy and holiday table.
    pub fn builtin() -> Self {
        Self {
            config: PayrollConfig::new(PayrollPolicy::default(), HolidayCalendar::korea()),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        self.config.policy()
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> &HolidayCalendar {
        self.config.holidays()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn config_path() -> &'static str {
        "./config/payroll"
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn temp_config_dir(name: &str, policy: &str, holidays: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "payroll_engine_{}_{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("policy.yaml"), policy).unwrap();
        fs::write(dir.join("holidays.yaml"), holidays).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.policy().standard_daily_minutes, 480);
        assert_eq!(loader.policy().monthly_standard_hours, Decimal::from(224));
    }

    #[test]
    fn test_shipped_config_matches_builtin() {
        let loaded = ConfigLoader::load(config_path()).unwrap();
        let builtin = ConfigLoader::builtin();

        assert_eq!(loaded.policy(), builtin.policy());
        for year in 2023..=2026 {
            assert_eq!(
                loaded.holidays().holidays_in_year(year),
                builtin.holidays().holidays_in_year(year),
                "holiday table differs for {}",
                year
            );
        }
    }

    #[test]
    fn test_loaded_holidays_answer_queries() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert!(loader.holidays().is_holiday(make_date("2026-01-01")));
        assert!(loader.holidays().is_holiday(make_date("2026-02-17")));
        assert!(!loader.holidays().is_holiday(make_date("2026-01-12")));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_invalid_policy_is_reported_as_parse_error() {
        let dir = temp_config_dir(
            "bad_policy",
            "standard_daily_minutes: 0\nmonthly_standard_hours: \"224\"\nweekly_holiday_allowance_hours: \"8\"\n",
            "fixed: []\n",
        );

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.ends_with("policy.yaml"));
                assert!(message.contains("standard_daily_minutes"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_impossible_holiday_date_is_rejected() {
        let dir = temp_config_dir(
            "bad_holiday",
            "standard_daily_minutes: 480\nmonthly_standard_hours: \"224\"\nweekly_holiday_allowance_hours: \"8\"\n",
            "fixed:\n  - { month: 2, day: 30, name: \"Nowhere Day\" }\n",
        );

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.ends_with("holidays.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let dir = temp_config_dir("malformed", "standard_daily_minutes: [", "fixed: []\n");

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::ConfigParseError { .. })
        ));
        fs::remove_dir_all(dir).ok();
    }
}
