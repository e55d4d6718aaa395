//! Human-readable rendering of payroll results.
//!
//! The report is a pure function of a [`crate::models::PayResult`]; it adds
//! no business logic beyond rounding for display.

mod formatter;

pub use formatter::{
    AdjustmentLine, PayReport, component_label, format_amount, format_signed, render_report,
};
