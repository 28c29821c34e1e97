//! HTTP request handlers for the Tip Distribution Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{RosterPolicy, calculate_shift};
use crate::models::{ShiftCalculation, ShiftInput};

use super::request::{
    CalculateShiftRequest, DateRangeQuery, EmployeeListQuery, NewEmployeeRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shifts/calculate", post(calculate_handler))
        .route("/shifts", post(create_shift_handler).get(list_shifts_handler))
        .route(
            "/shifts/:id",
            get(get_shift_handler).put(update_shift_handler),
        )
        .route(
            "/employees",
            get(list_employees_handler).post(add_employee_handler),
        )
        .route("/employees/:id/deactivate", post(deactivate_handler))
        .route("/employees/:id/reactivate", post(reactivate_handler))
        .route("/employees/:id/shifts", get(employee_shifts_handler))
        .route("/reports/monthly/:year/:month", get(monthly_report_handler))
        .with_state(state)
}

/// Handler for POST /shifts/calculate.
///
/// Previews a shift calculation without saving it.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateShiftRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shift preview");

    let (input, _) = json_body(payload, correlation_id)?
        .into_parts()
        .map_err(|err| log_failure(err, correlation_id, "Invalid shift form"))?;
    let calculation =
        run_calculation(&state, &input, RosterPolicy::ActiveOnly, correlation_id).await?;

    info!(
        correlation_id = %correlation_id,
        date = %calculation.date,
        pool = %calculation.total_tips_for_distribution,
        leftover = %calculation.leftover,
        duration_us = calculation.audit_trace.duration_us,
        "Shift preview completed"
    );
    Ok(json_response(StatusCode::OK, calculation))
}

/// Handler for POST /shifts.
///
/// Calculates the shift and saves it to the ledger.
async fn create_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateShiftRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shift save");

    let (input, created_by) = json_body(payload, correlation_id)?
        .into_parts()
        .map_err(|err| log_failure(err, correlation_id, "Invalid shift form"))?;
    let calculation =
        run_calculation(&state, &input, RosterPolicy::ActiveOnly, correlation_id).await?;

    let shift = state
        .ledger()
        .save(calculation.into_shift(created_by))
        .await
        .map_err(|err| log_failure(err, correlation_id, "Shift save failed"))?;

    info!(
        correlation_id = %correlation_id,
        shift_id = %shift.id,
        date = %shift.date,
        "Shift saved"
    );
    Ok(json_response(StatusCode::CREATED, shift))
}

/// Handler for PUT /shifts/:id.
///
/// Recalculates the shift from the submitted inputs and replaces the stored
/// record. Deactivated employees may stay on an edited roster.
async fn update_shift_handler(
    State(state): State<AppState>,
    shift_id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<CalculateShiftRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Path(shift_id) = shift_id.map_err(path_error)?;
    info!(correlation_id = %correlation_id, shift_id = %shift_id, "Processing shift edit");

    let (input, updated_by) = json_body(payload, correlation_id)?
        .into_parts()
        .map_err(|err| log_failure(err, correlation_id, "Invalid shift form"))?;
    let calculation =
        run_calculation(&state, &input, RosterPolicy::IncludeInactive, correlation_id).await?;

    let shift = state
        .ledger()
        .update(shift_id, calculation.into_patch(updated_by))
        .await
        .map_err(|err| log_failure(err, correlation_id, "Shift edit failed"))?;

    info!(correlation_id = %correlation_id, shift_id = %shift.id, "Shift updated");
    Ok(json_response(StatusCode::OK, shift))
}

/// Handler for GET /shifts/:id.
async fn get_shift_handler(
    State(state): State<AppState>,
    shift_id: Result<Path<Uuid>, PathRejection>,
) -> HandlerResult {
    let Path(shift_id) = shift_id.map_err(path_error)?;
    let shift = state.ledger().get(shift_id).await?;
    Ok(json_response(StatusCode::OK, shift))
}

/// Handler for GET /shifts?start=&end=.
async fn list_shifts_handler(
    State(state): State<AppState>,
    range: Result<Query<DateRangeQuery>, QueryRejection>,
) -> HandlerResult {
    let Query(range) = range.map_err(query_error)?;
    let shifts = state
        .ledger()
        .get_by_date_range(range.start, range.end)
        .await?;
    Ok(json_response(StatusCode::OK, shifts))
}

/// Handler for GET /employees.
async fn list_employees_handler(
    State(state): State<AppState>,
    query: Result<Query<EmployeeListQuery>, QueryRejection>,
) -> HandlerResult {
    let Query(query) = query.map_err(query_error)?;
    let directory = state.directory().read().await;
    let employees = if query.include_inactive {
        directory.list_all()
    } else {
        directory.list_active()
    };
    Ok(json_response(StatusCode::OK, employees))
}

/// Handler for POST /employees.
async fn add_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewEmployeeRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = json_body(payload, correlation_id)?;

    let employee = state
        .directory()
        .write()
        .await
        .add(request.into())
        .map_err(|err| log_failure(err, correlation_id, "Employee creation failed"))?;

    info!(correlation_id = %correlation_id, employee_id = %employee.id, "Employee created");
    Ok(json_response(StatusCode::CREATED, employee))
}

/// Handler for POST /employees/:id/deactivate.
async fn deactivate_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> HandlerResult {
    let mut directory = state.directory().write().await;
    let employee = directory.deactivate(&employee_id)?.clone();
    Ok(json_response(StatusCode::OK, employee))
}

/// Handler for POST /employees/:id/reactivate.
async fn reactivate_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> HandlerResult {
    let mut directory = state.directory().write().await;
    let employee = directory.reactivate(&employee_id)?.clone();
    Ok(json_response(StatusCode::OK, employee))
}

/// Handler for GET /employees/:id/shifts?start=&end=.
///
/// Returns the employee's archive report for the range.
async fn employee_shifts_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    range: Result<Query<DateRangeQuery>, QueryRejection>,
) -> HandlerResult {
    let Query(range) = range.map_err(query_error)?;
    state.directory().read().await.get(&employee_id)?;

    let report = state
        .ledger()
        .get_employee_report(&employee_id, range.start, range.end)
        .await?;
    Ok(json_response(StatusCode::OK, report))
}

/// Handler for GET /reports/monthly/:year/:month.
async fn monthly_report_handler(
    State(state): State<AppState>,
    period: Result<Path<(i32, u32)>, PathRejection>,
) -> HandlerResult {
    let Path((year, month)) = period.map_err(path_error)?;
    let report = state.ledger().get_monthly_report(year, month).await?;
    Ok(json_response(StatusCode::OK, report))
}

/// Runs the engine against the current directory.
async fn run_calculation(
    state: &AppState,
    input: &ShiftInput,
    policy: RosterPolicy,
    correlation_id: Uuid,
) -> Result<ShiftCalculation, ApiErrorResponse> {
    let directory = state.directory().read().await;
    calculate_shift(input, &directory, state.house(), policy)
        .map_err(|err| log_failure(err, correlation_id, "Shift calculation failed"))
}

fn log_failure(
    err: crate::error::EngineError,
    correlation_id: Uuid,
    context: &'static str,
) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "{}", context);
    err.into()
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
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
    Err(ApiErrorResponse::bad_request(error))
}

fn path_error(rejection: PathRejection) -> ApiErrorResponse {
    ApiErrorResponse::bad_request(ApiError::invalid_parameter(rejection.body_text()))
}

fn query_error(rejection: QueryRejection) -> ApiErrorResponse {
    ApiErrorResponse::bad_request(ApiError::invalid_parameter(rejection.body_text()))
}
