//! Ordinary wage rate derivation.
//!
//! Deductions and premiums are priced at an hourly rate derived from the
//! annual salary, independent of the contract components.

use rust_decimal::Decimal;

use crate::config::PayrollPolicy;
use crate::models::AuditStep;

const MONTHS_PER_YEAR: i64 = 12;
const MINUTES_PER_HOUR: i64 = 60;

/// The ordinary rate derived for one calculation.
#[derive(Debug, Clone)]
pub struct OrdinaryRateResult {
    /// Annual salary / 12, multiplied by the hire proration ratio.
    pub monthly_equivalent: Decimal,
    /// Monthly equivalent / standard monthly hours.
    pub hourly_rate: Decimal,
    /// Hourly rate / 60.
    pub minute_rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Derives the ordinary hourly and per-minute rate.
///
/// A non-positive annual salary or monthly equivalent gives a zero rate.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_ordinary_rate;
/// use payroll_engine::config::PayrollPolicy;
/// use rust_decimal::Decimal;
///
/// let result = calculate_ordinary_rate(36_000_000, Decimal::ONE, &PayrollPolicy::default(), 1);
/// assert_eq!(result.monthly_equivalent, Decimal::from(3_000_000));
/// assert_eq!(result.hourly_rate.round_dp(2).to_string(), "13392.86");
/// ```
pub fn calculate_ordinary_rate(
    annual_salary: i64,
    hire_ratio: Decimal,
    policy: &PayrollPolicy,
    step_number: u32,
) -> OrdinaryRateResult {
    let monthly_equivalent =
        Decimal::from(annual_salary) / Decimal::from(MONTHS_PER_YEAR) * hire_ratio;

    let (hourly_rate, minute_rate, reasoning) = if annual_salary <= 0
        || monthly_equivalent <= Decimal::ZERO
        || policy.monthly_standard_hours <= Decimal::ZERO
    {
        (
            Decimal::ZERO,
            Decimal::ZERO,
            format!(
                "Annual salary {} gives no positive monthly equivalent: ordinary rate is 0",
                annual_salary
            ),
        )
    } else {
        let hourly = monthly_equivalent / policy.monthly_standard_hours;
        let minute = hourly / Decimal::from(MINUTES_PER_HOUR);
        (
            hourly,
            minute,
            format!(
                "Monthly equivalent {} / {} standard hours = {} per hour",
                monthly_equivalent.round_dp(2),
                policy.monthly_standard_hours,
                hourly.round_dp(2)
            ),
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "ordinary_rate".to_string(),
        rule_name: "Ordinary Hourly Rate".to_string(),
        input: serde_json::json!({
            "annual_salary": annual_salary,
            "hire_proration_ratio": hire_ratio.to_string(),
            "monthly_standard_hours": policy.monthly_standard_hours.to_string()
        }),
        output: serde_json::json!({
            "monthly_equivalent": monthly_equivalent.to_string(),
            "hourly_rate": hourly_rate.to_string(),
            "minute_rate": minute_rate.to_string()
        }),
        reasoning,
    };

    OrdinaryRateResult {
        monthly_equivalent,
        hourly_rate,
        minute_rate,
        audit_step,
    }
}
