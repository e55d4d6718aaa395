//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure a calculation run or a commit can surface.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Failures are grouped into input validation (`InvalidRecord`,
/// `InvalidParameter`), missing prerequisites (`EmployeeNotFound`,
/// `ContractNotFound`), commit protocol errors and configuration errors.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidRecord {
///     row: 3,
///     message: "unparseable start time '25:00'".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid daily record at row 3: unparseable start time '25:00'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A daily record could not be parsed. The whole run is aborted.
    #[error("Invalid daily record at row {row}: {message}")]
    InvalidRecord {
        /// The 1-based row of the offending record.
        row: usize,
        /// A description of what made the record invalid.
        message: String,
    },

    /// A calculation parameter was out of range.
    #[error("Invalid parameter '{field}': {message}")]
    InvalidParameter {
        /// The parameter that was invalid.
        field: String,
        /// A description of what made the parameter invalid.
        message: String,
    },

    /// No employee exists with the given id.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        employee_id: String,
    },

    /// The employee has no contract baseline.
    #[error("No contract baseline found for employee {employee_id}")]
    ContractNotFound {
        /// The employee whose contract is missing.
        employee_id: String,
    },

    /// No pending calculation exists with the given id.
    #[error("Calculation not found: {calculation_id}")]
    CalculationNotFound {
        /// The calculation id that was looked up.
        calculation_id: String,
    },

    /// The inputs changed after the calculation ran, so it can no longer be committed.
    #[error("Calculation {calculation_id} is stale: inputs changed since it was computed")]
    StaleCalculation {
        /// The calculation id that was rejected.
        calculation_id: String,
    },

    /// The persistence store could not be accessed.
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the store failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/policy.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/policy.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/holidays.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/holidays.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_record_displays_row_and_message() {
        let error = EngineError::InvalidRecord {
            row: 12,
            message: "unknown status 'SICK'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid daily record at row 12: unknown status 'SICK'"
        );
    }

    #[test]
    fn test_invalid_parameter_displays_field_and_message() {
        let error = EngineError::InvalidParameter {
            field: "salary_percentage".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'salary_percentage': must not be negative"
        );
    }

    #[test]
    fn test_missing_prerequisites_display_employee() {
        let employee = EngineError::EmployeeNotFound {
            employee_id: "emp_404".to_string(),
        };
        assert_eq!(employee.to_string(), "Employee not found: emp_404");

        let contract = EngineError::ContractNotFound {
            employee_id: "emp_001".to_string(),
        };
        assert_eq!(
            contract.to_string(),
            "No contract baseline found for employee emp_001"
        );
    }

    #[test]
    fn test_stale_calculation_displays_id() {
        let error = EngineError::StaleCalculation {
            calculation_id: "abc".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Calculation abc is stale: inputs changed since it was computed"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_contract_not_found() -> EngineResult<()> {
            Err(EngineError::ContractNotFound {
                employee_id: "emp_001".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_contract_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
