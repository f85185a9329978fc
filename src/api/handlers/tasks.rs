//! `/tasks` handlers.

use crate::api::{
    ApiError, AppState,
    extract::{ApiJson, ApiQuery, parse_id},
    payload::{CreateTaskBody, PageQuery, UpdateTaskBody},
    response::{Success, TaskBody, TaskList},
};
use crate::task::{
    domain::{PageRequest, TaskId},
    services::TaskRegistryError,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

fn task_id(raw: &str) -> Result<TaskId, ApiError> {
    parse_id("task", raw).map(TaskId::from_uuid)
}

fn page_request(query: PageQuery) -> Result<PageRequest, ApiError> {
    PageRequest::try_from(query).map_err(|err| TaskRegistryError::from(err).into())
}

/// `GET /tasks/?limit&page`
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for `page=0`.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Success<TaskList>, ApiError> {
    let tasks = state.tasks.list(page_request(query)?).await?;
    Ok(Success::new(tasks.into()))
}

/// `GET /tasks/get/{id}`
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for an unknown or malformed id.
pub async fn get(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Success<TaskBody>, ApiError> {
    let task = state.tasks.get(task_id(&raw_id)?).await?;
    Ok(Success::new(task.into()))
}

/// `POST /tasks/create/`
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for invalid fields or dangling references
/// and [`ApiError::Conflict`] when the name is taken.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateTaskBody>,
) -> Result<Response, ApiError> {
    let task = state.tasks.create(body.into()).await?;
    Ok(Success::new(TaskBody::from(task)).created())
}

/// `PATCH /tasks/update/{id}`
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for an unknown id, [`ApiError::Validation`]
/// for invalid fields, dangling references or parent loops, and
/// [`ApiError::Conflict`] when the name is taken.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(body): ApiJson<UpdateTaskBody>,
) -> Result<Success<TaskBody>, ApiError> {
    let task = state.tasks.update(task_id(&raw_id)?, body.into()).await?;
    Ok(Success::new(task.into()))
}

/// `DELETE /tasks/del/{id}`
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for an unknown id.
pub async fn remove(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    state.tasks.delete(task_id(&raw_id)?).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// `GET /tasks/important?limit&page`
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for `page=0`.
pub async fn important(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Success<TaskList>, ApiError> {
    let tasks = state.tasks.important(page_request(query)?).await?;
    Ok(Success::new(tasks.into()))
}

/// `GET /tasks/free?limit&page`
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for `page=0`.
pub async fn free(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Success<TaskList>, ApiError> {
    let tasks = state.tasks.free(page_request(query)?).await?;
    Ok(Success::new(tasks.into()))
}

/// `PATCH /tasks/set_employee/{id}`
///
/// Runs the assignment policy and returns the task with the selection.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for an unknown task and
/// [`ApiError::Unavailable`] when there are no employees.
pub async fn set_employee(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Success<TaskBody>, ApiError> {
    let assignment = state.assignments.assign(task_id(&raw_id)?).await?;
    let (task, selection) = assignment.into_parts();
    Ok(Success::new(TaskBody {
        task,
        assignment: Some(selection),
    }))
}
