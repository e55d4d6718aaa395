//! Contract baseline model.
//!
//! A [`Contract`] holds the full-month ("100%") entitlement for each pay
//! component. All proration and deduction math uses these amounts as the
//! denominator.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Monthly contract baseline for one employee, in whole currency units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    /// Monthly basic salary.
    pub basic_salary: i64,
    /// Fixed overtime allowance (covers the first 10 overtime hours).
    #[serde(default)]
    pub fixed_overtime_allowance: i64,
    /// Contractual bonus.
    #[serde(default)]
    pub bonus: i64,
    /// Other allowance.
    #[serde(default)]
    pub other_allowance: i64,
    /// Meal allowance.
    #[serde(default)]
    pub meal_allowance: i64,
    /// Vehicle maintenance fee.
    #[serde(default)]
    pub vehicle_maintenance_fee: i64,
    /// Research and development expense.
    #[serde(default)]
    pub research_expense: i64,
    /// Childcare allowance.
    #[serde(default)]
    pub childcare_allowance: i64,
}

impl Contract {
    /// Returns each component paired with its field name, in display order.
    pub fn components(&self) -> [(&'static str, i64); 8] {
        [
            ("basic_salary", self.basic_salary),
            ("fixed_overtime_allowance", self.fixed_overtime_allowance),
            ("bonus", self.bonus),
            ("other_allowance", self.other_allowance),
            ("meal_allowance", self.meal_allowance),
            ("vehicle_maintenance_fee", self.vehicle_maintenance_fee),
            ("research_expense", self.research_expense),
            ("childcare_allowance", self.childcare_allowance),
        ]
    }

    /// Sum of all eight contractual components.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::Contract;
    ///
    /// let contract = Contract {
    ///     basic_salary: 2_500_000,
    ///     fixed_overtime_allowance: 300_000,
    ///     meal_allowance: 200_000,
    ///     ..Contract::default()
    /// };
    /// assert_eq!(contract.total(), 3_000_000);
    /// ```
    pub fn total(&self) -> i64 {
        self.components()
            .iter()
            .fold(0i64, |total, (_, amount)| total.saturating_add(*amount))
    }

    /// Rejects negative amounts; every component must be a non-negative entitlement.
    pub fn validate(&self) -> EngineResult<()> {
        match self.components().iter().find(|(_, amount)| *amount < 0) {
            Some((field, amount)) => Err(EngineError::InvalidParameter {
                field: (*field).to_string(),
                message: format!("contract amount must not be negative, got {}", amount),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_contract_defaults_to_zero() {
        let json = r#"{"basic_salary": 2500000, "meal_allowance": 200000}"#;
        let contract: Contract = serde_json::from_str(json).unwrap();
        assert_eq!(contract.basic_salary, 2_500_000);
        assert_eq!(contract.meal_allowance, 200_000);
        assert_eq!(contract.bonus, 0);
        assert_eq!(contract.total(), 2_700_000);
    }

    #[test]
    fn test_validate_rejects_negative_component() {
        let contract = Contract {
            basic_salary: 1_000,
            vehicle_maintenance_fee: -5,
            ..Contract::default()
        };
        match contract.validate() {
            Err(EngineError::InvalidParameter { field, .. }) => {
                assert_eq!(field, "vehicle_maintenance_fee")
            }
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_zero_contract() {
        assert!(Contract::default().validate().is_ok());
    }
}
