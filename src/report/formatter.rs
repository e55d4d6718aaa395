//! Three-block rendering of a payroll result.
//!
//! Amounts are rounded half-up to whole currency units here and nowhere
//! earlier, and the grand total is the sum of the rounded lines so the
//! printed figures always add up.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PayResult, round_currency};

const LABEL_WIDTH: usize = 30;
const AMOUNT_WIDTH: usize = 14;

/// Display labels for the nine pay components, keyed by field name.
const COMPONENT_LABELS: [(&str, &str); 9] = [
    ("basic_salary", "Basic salary"),
    ("fixed_overtime_allowance", "Fixed overtime allowance"),
    ("additional_overtime_premium", "Additional overtime premium"),
    ("bonus", "Bonus"),
    ("other_allowance", "Other allowance"),
    ("meal_allowance", "Meal allowance"),
    ("vehicle_maintenance_fee", "Vehicle maintenance fee"),
    ("research_expense", "Research expense"),
    ("childcare_allowance", "Childcare allowance"),
];

/// Returns the display label for a component field name.
pub fn component_label(field: &str) -> &str {
    COMPONENT_LABELS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, label)| *label)
        .unwrap_or(field)
}

/// Formats an amount with thousands separators.
///
/// # Example
///
/// ```
/// use payroll_engine::report::format_amount;
///
/// assert_eq!(format_amount(2_297_194), "2,297,194");
/// assert_eq!(format_amount(-950), "-950");
/// assert_eq!(format_amount(0), "0");
/// ```
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formats an amount with an explicit sign.
pub fn format_signed(amount: i64) -> String {
    if amount < 0 {
        format_amount(amount)
    } else {
        format!("+{}", format_amount(amount))
    }
}

/// One itemized adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentLine {
    /// What was adjusted.
    pub label: String,
    /// Signed, rounded amount.
    pub amount: i64,
    /// How the amount was arrived at.
    pub rationale: String,
}

/// A rendered result: original contract, adjustments and final payout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayReport {
    /// The contract baseline block.
    pub original: String,
    /// The itemized adjustments block.
    pub adjustments: String,
    /// The final payout block with grand total.
    pub final_payout: String,
    /// The adjustments as structured data.
    pub adjustment_lines: Vec<AdjustmentLine>,
    /// Sum of the rounded final components.
    pub grand_total: i64,
}

impl fmt::Display for PayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n\n{}\n\n{}",
            self.original, self.adjustments, self.final_payout
        )
    }
}

fn amount_line(label: &str, amount: &str) -> String {
    format!("{:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}", label, amount)
}

fn rule(title: &str) -> String {
    format!("== {} ==", title)
}

/// Renders a [`PayResult`] as three text blocks.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{CalculationContext, Contract, Employee, PayPeriod};
/// use payroll_engine::report::render_report;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Kim".to_string(),
///     annual_salary: 36_000_000,
///     hire_date: None,
///     department: None,
///     position: None,
/// };
/// let contract = Contract { basic_salary: 2_500_000, ..Contract::default() };
/// let context = CalculationContext::new(employee, contract, PayPeriod::new(2026, 1).unwrap(), vec![]);
/// let result = compute(&context, ConfigLoader::builtin().config()).unwrap();
///
/// let report = render_report(&result);
/// assert!(report.original.contains("2,500,000"));
/// assert!(report.final_payout.contains("Total"));
/// ```
pub fn render_report(result: &PayResult) -> PayReport {
    let original = render_original(result);
    let adjustment_lines = adjustment_lines(result);
    let adjustments = render_adjustments(result, &adjustment_lines);
    let (final_payout, grand_total) = render_final(result);

    PayReport {
        original,
        adjustments,
        final_payout,
        adjustment_lines,
        grand_total,
    }
}

fn render_original(result: &PayResult) -> String {
    let mut lines = vec![rule(&format!("Original contract ({})", result.period))];
    for (field, amount) in result.contract.components() {
        lines.push(amount_line(component_label(field), &format_amount(amount)));
    }
    lines.push(amount_line("Total", &format_amount(result.contract.total())));
    lines.push(format!(
        "Ordinary hourly rate: {} (monthly equivalent {})",
        format_amount(round_currency(result.ordinary_hourly_rate)),
        format_amount(round_currency(result.monthly_equivalent))
    ));
    lines.join("\n")
}

fn adjustment_lines(result: &PayResult) -> Vec<AdjustmentLine> {
    let mut lines = Vec::new();

    if result.hire_proration_ratio != Decimal::ONE {
        lines.push(AdjustmentLine {
            label: "Hire proration".to_string(),
            amount: round_currency(result.prorated.total()) - result.contract.total(),
            rationale: format!(
                "employed for {}% of the month",
                (result.hire_proration_ratio * Decimal::ONE_HUNDRED).round_dp(2)
            ),
        });
    }

    if result.total_shortfall_minutes > 0 {
        lines.push(AdjustmentLine {
            label: "Shortfall deduction".to_string(),
            amount: -round_currency(result.shortfall_deduction),
            rationale: format!(
                "{} minutes short on weekdays at {} per minute, spread over reducible items",
                result.total_shortfall_minutes,
                result.minute_rate.round_dp(2)
            ),
        });
    }

    if !result.penalised_weeks.is_empty() {
        lines.push(AdjustmentLine {
            label: "Weekly holiday allowance".to_string(),
            amount: -round_currency(result.weekly_penalty),
            rationale: format!(
                "absence in {} week(s): {}; charged to basic salary",
                result.penalised_weeks.len(),
                result
                    .penalised_weeks
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        });
    }

    if result.paid_premium_minutes > 0 {
        lines.push(AdjustmentLine {
            label: "Additional overtime premium".to_string(),
            amount: round_currency(result.overtime_premium),
            rationale: format!(
                "{} of {} eligible minutes beyond the fixed overtime block",
                result.paid_premium_minutes, result.premium_eligible_minutes
            ),
        });
    }

    if let Some(bonus) = result.ad_hoc_bonus.filter(|bonus| *bonus != 0) {
        lines.push(AdjustmentLine {
            label: "Ad-hoc bonus".to_string(),
            amount: bonus,
            rationale: "entered for this month, added to bonus".to_string(),
        });
    }

    let hundred = Decimal::ONE_HUNDRED;
    let before_clamp = if result.salary_percentage <= hundred {
        result.interim.total() * result.salary_percentage / hundred
    } else {
        result.interim.total() + result.percentage_excess
    };
    if result.salary_percentage != hundred {
        let change = before_clamp - result.interim.total();
        let rationale = if result.salary_percentage < hundred {
            format!("{}% applied to every component", result.salary_percentage)
        } else {
            format!(
                "{}% of the prorated contract paid into other allowance",
                result.salary_percentage - hundred
            )
        };
        lines.push(AdjustmentLine {
            label: "Salary percentage".to_string(),
            amount: round_currency(change),
            rationale,
        });
    }

    let clamp = result.final_pay.total() - before_clamp;
    if clamp > Decimal::ZERO {
        lines.push(AdjustmentLine {
            label: "Floor at zero".to_string(),
            amount: round_currency(clamp),
            rationale: "components that fell below zero are paid as zero".to_string(),
        });
    }

    lines
}

fn render_adjustments(result: &PayResult, lines: &[AdjustmentLine]) -> String {
    let mut out = vec![rule("Adjustments")];
    if lines.is_empty() {
        out.push("No adjustments".to_string());
    }
    for line in lines {
        out.push(format!(
            "{}  ({})",
            amount_line(&line.label, &format_signed(line.amount)),
            line.rationale
        ));
    }
    out.push(format!(
        "Attendance ratio: {}%",
        (result.attendance_ratio * Decimal::ONE_HUNDRED).round_dp(2)
    ));
    for warning in &result.audit_trace.warnings {
        out.push(format!("Note [{}]: {}", warning.code, warning.message));
    }
    out.join("\n")
}

fn render_final(result: &PayResult) -> (String, i64) {
    let mut lines = vec![rule("Final payout")];
    let mut total = 0i64;
    for (field, amount) in result.final_pay.entries() {
        let rounded = round_currency(amount);
        total = total.saturating_add(rounded);
        lines.push(amount_line(component_label(field), &format_amount(rounded)));
    }
    lines.push(amount_line("Total", &format_amount(total)));
    (lines.join("\n"), total)
}
