//! Employee model.
//!
//! Only the annual salary and hire date take part in the calculation; the
//! remaining identity fields are carried through for display and persistence.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::PayPeriod;

/// Represents an employee as loaded from the persistence store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Annual salary in whole currency units.
    pub annual_salary: i64,
    /// The date the employee was hired, if known.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// Department name.
    #[serde(default)]
    pub department: Option<String>,
    /// Job title.
    #[serde(default)]
    pub position: Option<String>,
}

impl Employee {
    /// Returns the hire date when it falls inside `period` on a day other than the 1st.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, PayPeriod};
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Kim Minji".to_string(),
    ///     annual_salary: 36_000_000,
    ///     hire_date: NaiveDate::from_ymd_opt(2026, 1, 15),
    ///     department: None,
    ///     position: None,
    /// };
    /// let january = PayPeriod::new(2026, 1).unwrap();
    /// assert_eq!(employee.mid_month_hire_date(january), NaiveDate::from_ymd_opt(2026, 1, 15));
    ///
    /// let february = PayPeriod::new(2026, 2).unwrap();
    /// assert_eq!(employee.mid_month_hire_date(february), None);
    /// ```
    pub fn mid_month_hire_date(&self, period: PayPeriod) -> Option<NaiveDate> {
        self.hire_date
            .filter(|date| period.contains_date(*date) && date.day() != 1)
    }
}
