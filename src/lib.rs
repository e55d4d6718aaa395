//! Monthly Payroll Adjustment Engine
//!
//! This crate turns a month of daily work records into final pay components:
//! hire proration, shortfall deductions, weekly holiday allowance penalties,
//! additional overtime premium and the salary percentage are applied against
//! a contract baseline, with an audit trace explaining every step.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod store;
