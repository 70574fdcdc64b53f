//! HTTP request handlers for the Increment Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::build_report;
use crate::error::EngineError;
use crate::models::{Employee, EmployeeSnapshot, EmployeeUpdate, NewPolicy, PolicyUpdate};

use super::request::CalculationRequest;
use super::response::{ActionResponse, ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route(
            "/api/employees",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route(
            "/api/employees/:employee_id",
            get(get_employee_handler)
                .put(update_employee_handler)
                .delete(delete_employee_handler),
        )
        .route(
            "/api/hr-policies",
            get(list_policies_handler).post(create_policy_handler),
        )
        .route(
            "/api/hr-policies/:policy_id",
            get(get_policy_handler)
                .put(update_policy_handler)
                .delete(delete_policy_handler),
        )
        .route("/api/increments", get(stored_report_handler))
        .route("/api/increments/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for GET /.
async fn health_handler() -> &'static str {
    "Employee Management Backend is running!"
}

/// Converts an engine error into a JSON error response, logging it.
fn engine_error(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    let api_error: ApiErrorResponse = err.into();
    api_error.into_response()
}

/// Converts a body extraction failure into a 400 response.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
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
    (StatusCode::BAD_REQUEST, Json(error)).into_response()
}

/// Converts a bad policy id in the path into a 400 response.
fn path_rejection(correlation_id: Uuid, rejection: PathRejection) -> Response {
    warn!(correlation_id = %correlation_id, error = %rejection, "Invalid path parameter");
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::validation_error(rejection.body_text())),
    )
        .into_response()
}

/// Handler for GET /api/employees.
async fn list_employees_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().list_employees() {
        Ok(employees) => {
            info!(
                correlation_id = %correlation_id,
                count = employees.len(),
                "Listed employees"
            );
            Json(employees).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /api/employees.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employee registration");

    let employee = match payload {
        Ok(Json(employee)) => employee,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = employee
        .validate()
        .and_then(|()| state.store().insert_employee(&employee));
    match result {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee.employee_id,
                "Employee registered"
            );
            (
                StatusCode::CREATED,
                Json(ActionResponse::employee(
                    "Employee added successfully",
                    employee.employee_id,
                )),
            )
                .into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /api/employees/:employee_id.
async fn get_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().get_employee(&employee_id) {
        Ok(Some(employee)) => Json(employee).into_response(),
        Ok(None) => engine_error(correlation_id, EngineError::EmployeeNotFound { employee_id }),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for PUT /api/employees/:employee_id.
async fn update_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Processing employee update"
    );

    let update = match payload {
        Ok(Json(update)) => update,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = update
        .validate()
        .and_then(|()| state.store().update_employee(&employee_id, &update));
    match result {
        Ok(employee) => Json(ActionResponse::employee(
            "Employee updated successfully",
            employee.employee_id,
        ))
        .into_response(),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for DELETE /api/employees/:employee_id.
async fn delete_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().delete_employee(&employee_id) {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                "Employee deleted"
            );
            Json(ActionResponse::employee(
                "Employee deleted successfully",
                employee_id,
            ))
            .into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /api/hr-policies.
async fn list_policies_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.store().list_policies() {
        Ok(policies) => {
            info!(
                correlation_id = %correlation_id,
                count = policies.len(),
                "Listed policies"
            );
            Json(policies).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /api/hr-policies.
async fn create_policy_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewPolicy>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing policy creation");

    let policy = match payload {
        Ok(Json(policy)) => policy,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = policy
        .validate()
        .and_then(|()| state.store().insert_policy(&policy));
    match result {
        Ok(policy_id) => {
            info!(
                correlation_id = %correlation_id,
                policy_id,
                experience_range = %policy.experience_range,
                "Policy created"
            );
            (
                StatusCode::CREATED,
                Json(ActionResponse::policy("HR policy added successfully", policy_id)),
            )
                .into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /api/hr-policies/:policy_id.
async fn get_policy_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let policy_id = match path {
        Ok(Path(policy_id)) => policy_id,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };

    match state.store().get_policy(policy_id) {
        Ok(Some(policy)) => Json(policy).into_response(),
        Ok(None) => engine_error(correlation_id, EngineError::PolicyNotFound { policy_id }),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for PUT /api/hr-policies/:policy_id.
async fn update_policy_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PolicyUpdate>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let policy_id = match path {
        Ok(Path(policy_id)) => policy_id,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, policy_id, "Processing policy update");

    let update = match payload {
        Ok(Json(update)) => update,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = update
        .validate()
        .and_then(|()| state.store().update_policy(policy_id, &update));
    match result {
        Ok(policy) => Json(ActionResponse::policy(
            "HR policy updated successfully",
            policy.policy_id,
        ))
        .into_response(),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for DELETE /api/hr-policies/:policy_id.
async fn delete_policy_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let policy_id = match path {
        Ok(Path(policy_id)) => policy_id,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };

    match state.store().delete_policy(policy_id) {
        Ok(()) => {
            info!(correlation_id = %correlation_id, policy_id, "Policy deleted");
            Json(ActionResponse::policy(
                "HR policy deleted successfully",
                policy_id,
            ))
            .into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /api/increments.
///
/// Reports over the stored employees and policies, policies in id order.
async fn stored_report_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing stored increment report");

    let store = state.store();
    let snapshot = store
        .list_employees()
        .and_then(|employees| Ok((employees, store.list_policies()?)));
    let (employees, policies) = match snapshot {
        Ok(snapshot) => snapshot,
        Err(err) => return engine_error(correlation_id, err),
    };

    let employees: Vec<EmployeeSnapshot> = employees.into_iter().map(Into::into).collect();
    respond_with_report(correlation_id, &employees, &policies)
}

/// Handler for POST /api/increments/calculate.
///
/// Accepts caller-supplied employees and policies and returns the report.
async fn calculate_handler(payload: Result<Json<CalculationRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    match request.into_snapshots() {
        Ok((employees, policies)) => respond_with_report(correlation_id, &employees, &policies),
        Err(err) => engine_error(correlation_id, err),
    }
}

fn respond_with_report(
    correlation_id: Uuid,
    employees: &[EmployeeSnapshot],
    policies: &[crate::models::Policy],
) -> Response {
    let start_time = Instant::now();
    let report = build_report(employees, policies);
    let duration = start_time.elapsed();

    if !report.audit_trace.warnings.is_empty() {
        warn!(
            correlation_id = %correlation_id,
            warnings = report.audit_trace.warnings.len(),
            "Increment report has warnings"
        );
    }
    info!(
        correlation_id = %correlation_id,
        report_id = %report.report_id,
        employees = report.totals.employees,
        matched = report.totals.matched,
        total_increment = %report.totals.total_increment,
        duration_us = duration.as_micros(),
        "Increment report completed"
    );
    Json(report).into_response()
}
