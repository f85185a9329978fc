//! `/employees` handlers.

use crate::api::{
    ApiError, AppState,
    extract::{ApiJson, parse_id},
    payload::{CreateEmployeeBody, UpdateEmployeeBody},
    response::{EmployeeBody, EmployeeList, Success},
};
use crate::employee::domain::{Employee, EmployeeId, EmployeeWorkload};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

fn employee_id(raw: &str) -> Result<EmployeeId, ApiError> {
    parse_id("employee", raw).map(EmployeeId::from_uuid)
}

/// `GET /employees/`
///
/// # Errors
///
/// Returns [`ApiError::Internal`] when the directory cannot be read.
pub async fn list(State(state): State<AppState>) -> Result<Success<EmployeeList<Employee>>, ApiError> {
    let employees = state.employees.list().await?;
    Ok(Success::new(employees.into()))
}

/// `GET /employees/get/{id}`
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for an unknown or malformed id.
pub async fn get(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Success<EmployeeBody>, ApiError> {
    let employee = state.employees.get(employee_id(&raw_id)?).await?;
    Ok(Success::new(EmployeeBody { employee }))
}

/// `POST /employees/create`
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for invalid fields and
/// [`ApiError::Conflict`] when the email is taken.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateEmployeeBody>,
) -> Result<Response, ApiError> {
    let employee = state.employees.create(body.into()).await?;
    Ok(Success::new(EmployeeBody { employee }).created())
}

/// `PATCH /employees/update/{id}`
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for an unknown id, [`ApiError::Validation`]
/// for invalid fields and [`ApiError::Conflict`] when the email is taken.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(body): ApiJson<UpdateEmployeeBody>,
) -> Result<Success<EmployeeBody>, ApiError> {
    let employee = state
        .employees
        .update(employee_id(&raw_id)?, body.into())
        .await?;
    Ok(Success::new(EmployeeBody { employee }))
}

/// `DELETE /employees/del/{id}`
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for an unknown id and
/// [`ApiError::BadRequest`] while tasks are still assigned.
pub async fn remove(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    state.employees.delete(employee_id(&raw_id)?).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// `GET /employees/busy`
///
/// # Errors
///
/// Returns [`ApiError::Internal`] when workloads cannot be read.
pub async fn busy(
    State(state): State<AppState>,
) -> Result<Success<EmployeeList<EmployeeWorkload>>, ApiError> {
    let workloads = state.employees.busy().await?;
    Ok(Success::new(workloads.into()))
}

/// `GET /employees/free`
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] when nobody is idle.
pub async fn free(State(state): State<AppState>) -> Result<Success<EmployeeList<Employee>>, ApiError> {
    let employees = state.employees.free().await?;
    Ok(Success::new(employees.into()))
}
