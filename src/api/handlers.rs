//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute;
use crate::error::EngineError;
use crate::models::{MonthlyPayRecord, PayPeriod, RawDailyEntry, parse_records};
use crate::report::render_report;
use crate::store::{commit, edit_work_log};

use super::request::{CalculationRequest, CommitRequest};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse, ENGINE_VERSION};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/commit", post(commit_handler))
        .route(
            "/employees/:employee_id/pay/:year/:month",
            get(monthly_pay_handler),
        )
        .route(
            "/employees/:employee_id/work-log/:year/:month",
            put(work_log_handler),
        )
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(err: EngineError) -> Response {
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON body rejection to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /calculate endpoint.
///
/// Resolves the request against the store, runs the engine and registers the
/// result as a pending commit. Nothing is persisted.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match perform_calculation(&state, &request) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                calculation_id = %response.calculation_id,
                employee_id = %request.employee_id,
                period = %response.result.period,
                records = response.result.records.len(),
                grand_total = response.report.grand_total,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                error = %err,
                "Calculation failed"
            );
            error_response(err)
        }
    }
}

/// Runs one calculation and registers it with the ledger.
fn perform_calculation(
    state: &AppState,
    request: &CalculationRequest,
) -> Result<CalculationResponse, EngineError> {
    let context = request.resolve(state.store())?;
    let result = compute(&context, state.config().config())?;
    let record = MonthlyPayRecord::from_result(&result);
    let report = render_report(&result);
    let calculation_id = state.ledger().register(context, record.clone())?;

    Ok(CalculationResponse {
        calculation_id,
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        result,
        record,
        report,
    })
}

/// Handler for POST /commit endpoint.
///
/// Persists a pending calculation if its inputs are unchanged.
async fn commit_handler(
    State(state): State<AppState>,
    payload: Result<Json<CommitRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing commit request");

    let commit_request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let calculation_id = commit_request.calculation_id;

    let outcome = commit(state.store(), state.ledger(), calculation_id, |store| {
        commit_request.request.resolve(store)
    });

    match outcome {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                calculation_id = %calculation_id,
                employee_id = %record.employee_id,
                year = record.year,
                month = record.month,
                total = record.total(),
                "Monthly pay committed"
            );
            json_response(StatusCode::OK, record)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                calculation_id = %calculation_id,
                error = %err,
                "Commit rejected"
            );
            error_response(err)
        }
    }
}

/// Handler for GET /employees/:employee_id/pay/:year/:month.
async fn monthly_pay_handler(
    State(state): State<AppState>,
    Path((employee_id, year, month)): Path<(String, i32, u32)>,
) -> Response {
    let lookup = PayPeriod::new(year, month)
        .and_then(|period| state.store().monthly_pay(&employee_id, period));

    match lookup {
        Ok(Some(record)) => json_response(StatusCode::OK, record),
        Ok(None) => json_response(
            StatusCode::NOT_FOUND,
            ApiError::new(
                "PAY_RECORD_NOT_FOUND",
                format!(
                    "No committed pay for employee {} in {}-{:02}",
                    employee_id, year, month
                ),
            ),
        ),
        Err(err) => error_response(err),
    }
}

/// Handler for PUT /employees/:employee_id/work-log/:year/:month.
///
/// Replaces the stored month log and invalidates pending commits that read it.
async fn work_log_handler(
    State(state): State<AppState>,
    Path((employee_id, year, month)): Path<(String, i32, u32)>,
    payload: Result<Json<Vec<RawDailyEntry>>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let entries = match payload {
        Ok(Json(entries)) => entries,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let outcome = PayPeriod::new(year, month).and_then(|period| {
        let records = parse_records(&entries)?;
        edit_work_log(state.store(), state.ledger(), &employee_id, period, records)
    });

    match outcome {
        Ok(invalidated) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                year,
                month,
                records = entries.len(),
                invalidated,
                "Work log replaced"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                error = %err,
                "Work log rejected"
            );
            error_response(err)
        }
    }
}
