//! Proportional distribution of the shortfall deduction.
//!
//! The deduction is spread across the six reducible components in
//! proportion to their prorated amounts. Bonus and other allowance are
//! never reduced.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, DeductionShares, ProratedContract};

/// The result of distributing the shortfall deduction.
#[derive(Debug, Clone)]
pub struct DeductionDistributionResult {
    /// The share charged to each reducible component.
    pub shares: DeductionShares,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Splits `deduction` across the reducible components of `prorated`.
///
/// When the reducible components sum to zero every share is zero. Each
/// share is the component's fraction of the reducible total times
/// `deduction`; fails with `CalculationError` if that leaves the decimal
/// range.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::distribute_deduction;
/// use payroll_engine::models::{Contract, ProratedContract};
/// use rust_decimal::Decimal;
///
/// let contract = Contract {
///     basic_salary: 3_000_000,
///     meal_allowance: 1_000_000,
///     bonus: 500_000,
///     ..Contract::default()
/// };
/// let prorated = ProratedContract::from_contract(&contract, Decimal::ONE);
/// let result = distribute_deduction(&prorated, Decimal::from(400_000), 1).unwrap();
///
/// assert_eq!(result.shares.basic_salary, Decimal::from(300_000));
/// assert_eq!(result.shares.meal_allowance, Decimal::from(100_000));
/// ```
pub fn distribute_deduction(
    prorated: &ProratedContract,
    deduction: Decimal,
    step_number: u32,
) -> EngineResult<DeductionDistributionResult> {
    let reducible_total = prorated.reducible_total();

    let shares = if reducible_total.is_zero() {
        DeductionShares::default()
    } else {
        let share = |amount: Decimal| {
            (amount / reducible_total)
                .checked_mul(deduction)
                .ok_or_else(|| EngineError::CalculationError {
                    message: format!(
                        "deduction {} cannot be distributed over reducible total {}",
                        deduction, reducible_total
                    ),
                })
        };
        DeductionShares {
            basic_salary: share(prorated.basic_salary)?,
            fixed_overtime_allowance: share(prorated.fixed_overtime_allowance)?,
            meal_allowance: share(prorated.meal_allowance)?,
            childcare_allowance: share(prorated.childcare_allowance)?,
            vehicle_maintenance_fee: share(prorated.vehicle_maintenance_fee)?,
            research_expense: share(prorated.research_expense)?,
        }
    };

    let reasoning = if reducible_total.is_zero() {
        "Reducible components sum to zero: nothing to distribute".to_string()
    } else {
        format!(
            "Deduction {} spread over reducible total {}; basic salary bears {}",
            deduction.round_dp(2),
            reducible_total.round_dp(2),
            shares.basic_salary.round_dp(2)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "deduction_distribution".to_string(),
        rule_name: "Shortfall Distribution".to_string(),
        input: serde_json::json!({
            "deduction": deduction.to_string(),
            "reducible_total": reducible_total.to_string()
        }),
        output: serde_json::to_value(&shares).unwrap_or_default(),
        reasoning,
    };

    Ok(DeductionDistributionResult { shares, audit_step })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Contract;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn prorated(contract: Contract) -> ProratedContract {
        ProratedContract::from_contract(&contract, Decimal::ONE)
    }

    #[test]
    fn test_shares_proportional_to_components() {
        let shares = distribute_deduction(
            &prorated(Contract {
                basic_salary: 2_500_000,
                fixed_overtime_allowance: 300_000,
                ..Contract::default()
            }),
            dec("280000"),
            1,
        )
        .unwrap()
        .shares;

        assert_eq!(shares.basic_salary, dec("250000"));
        assert_eq!(shares.fixed_overtime_allowance, dec("30000"));
        assert_eq!(shares.meal_allowance, Decimal::ZERO);
    }

    #[test]
    fn test_shares_sum_to_deduction() {
        let result = distribute_deduction(
            &prorated(Contract {
                basic_salary: 2_345_678,
                fixed_overtime_allowance: 312_345,
                meal_allowance: 200_000,
                childcare_allowance: 100_000,
                vehicle_maintenance_fee: 200_000,
                research_expense: 123_457,
                ..Contract::default()
            }),
            dec("107142.857142857142857142857"),
            1,
        )
        .unwrap();

        let difference = (result.shares.total() - dec("107142.857142857142857142857")).abs();
        assert!(difference < dec("0.000001"), "difference {}", difference);
    }

    #[test]
    fn test_bonus_and_other_allowance_excluded() {
        let result = distribute_deduction(
            &prorated(Contract {
                basic_salary: 1_000_000,
                bonus: 9_000_000,
                other_allowance: 9_000_000,
                ..Contract::default()
            }),
            dec("50000"),
            1,
        )
        .unwrap();
        assert_eq!(result.shares.basic_salary, dec("50000"));
    }

    #[test]
    fn test_zero_reducible_total_gives_zero_shares() {
        let result = distribute_deduction(
            &prorated(Contract {
                bonus: 1_000_000,
                ..Contract::default()
            }),
            dec("50000"),
            3,
        )
        .unwrap();
        assert_eq!(result.shares, DeductionShares::default());
        assert!(result.audit_step.reasoning.contains("nothing to distribute"));
    }

    #[test]
    fn test_near_limit_amounts_distribute_without_overflow() {
        let result = distribute_deduction(
            &prorated(Contract {
                basic_salary: 9_000_000_000_000_000_000,
                meal_allowance: 1,
                ..Contract::default()
            }),
            dec("9000000000000000000"),
            1,
        )
        .unwrap();

        let difference = (result.shares.total() - dec("9000000000000000000")).abs();
        assert!(difference < Decimal::ONE, "difference {}", difference);
        assert_eq!(result.shares.meal_allowance.round(), Decimal::ONE);
    }
}
