//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for calculating monthly pay,
//! committing reviewed results and maintaining work logs.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, CommitRequest};
pub use response::{ApiError, ApiErrorResponse, CalculationResponse, ENGINE_VERSION};
pub use state::AppState;
