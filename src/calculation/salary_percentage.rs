//! Salary percentage application.
//!
//! At or below 100% every interim component, the ad-hoc bonus and the
//! overtime premium included, is scaled by `pct / 100`. Above 100% nothing
//! is scaled; the excess percentage of the prorated contract total is paid
//! into other allowance and the ad-hoc bonus stays at its entered value.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, PayComponents};

/// The result of applying the salary percentage.
#[derive(Debug, Clone)]
pub struct SalaryPercentageResult {
    /// Components after the percentage, before clamping.
    pub components: PayComponents,
    /// The multiplier applied to every component.
    pub multiplier: Decimal,
    /// Amount added to other allowance (zero at or below 100%).
    pub percentage_excess: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the salary percentage to the interim components.
///
/// `prorated_total` is the sum of the eight prorated contract components
/// before any shortfall. Fails with `CalculationError` when the excess
/// overflows the decimal range.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::apply_salary_percentage;
/// use payroll_engine::models::PayComponents;
/// use rust_decimal::Decimal;
///
/// let interim = PayComponents {
///     basic_salary: Decimal::from(2_000_000),
///     ..PayComponents::default()
/// };
///
/// let half = apply_salary_percentage(&interim, Decimal::from(2_000_000), Decimal::from(50), None, 1).unwrap();
/// assert_eq!(half.components.basic_salary, Decimal::from(1_000_000));
///
/// let boosted = apply_salary_percentage(&interim, Decimal::from(2_000_000), Decimal::from(150), None, 1).unwrap();
/// assert_eq!(boosted.components.basic_salary, Decimal::from(2_000_000));
/// assert_eq!(boosted.components.other_allowance, Decimal::from(1_000_000));
/// ```
pub fn apply_salary_percentage(
    interim: &PayComponents,
    prorated_total: Decimal,
    salary_percentage: Decimal,
    ad_hoc_bonus: Option<i64>,
    step_number: u32,
) -> EngineResult<SalaryPercentageResult> {
    let hundred = Decimal::ONE_HUNDRED;

    let (components, multiplier, percentage_excess, reasoning) = if salary_percentage <= hundred {
        let multiplier = salary_percentage / hundred;
        let reasoning = match ad_hoc_bonus {
            Some(bonus) => format!(
                "{}% applied to every component, including the ad-hoc bonus of {}",
                salary_percentage, bonus
            ),
            None => format!("{}% applied to every component", salary_percentage),
        };
        (
            interim.map(|amount| amount * multiplier),
            multiplier,
            Decimal::ZERO,
            reasoning,
        )
    } else {
        let out_of_range = || EngineError::CalculationError {
            message: format!(
                "salary percentage {} of {} exceeds the currency range",
                salary_percentage, prorated_total
            ),
        };
        let excess = ((salary_percentage - hundred) / hundred)
            .checked_mul(prorated_total)
            .ok_or_else(out_of_range)?;
        let mut components = interim.clone();
        components.other_allowance = components
            .other_allowance
            .checked_add(excess)
            .filter(|amount| *amount <= Decimal::from(i64::MAX))
            .ok_or_else(out_of_range)?;
        let mut reasoning = format!(
            "{}% exceeds 100: components unscaled, {}% of prorated total {} = {} added to other allowance",
            salary_percentage,
            salary_percentage - hundred,
            prorated_total.round_dp(2),
            excess.round_dp(2)
        );
        if let Some(bonus) = ad_hoc_bonus {
            reasoning.push_str(&format!("; ad-hoc bonus of {} paid unscaled", bonus));
        }
        (components, Decimal::ONE, excess, reasoning)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary_percentage".to_string(),
        rule_name: "Salary Percentage".to_string(),
        input: serde_json::json!({
            "salary_percentage": salary_percentage.to_string(),
            "prorated_total": prorated_total.to_string(),
            "ad_hoc_bonus": ad_hoc_bonus
        }),
        output: serde_json::json!({
            "multiplier": multiplier.to_string(),
            "percentage_excess": percentage_excess.to_string(),
            "total": components.total().to_string()
        }),
        reasoning,
    };

    Ok(SalaryPercentageResult {
        components,
        multiplier,
        percentage_excess,
        audit_step,
    })
}
