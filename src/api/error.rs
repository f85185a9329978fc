//! HTTP error mapping.
//!
//! Service errors are collapsed into [`ApiError`], which renders the uniform
//! `{"status": "error", "type", "code", "detail"}` body.

use crate::assignment::services::AssignmentError;
use crate::employee::{ports::EmployeeRepositoryError, services::EmployeeDirectoryError};
use crate::task::{ports::TaskRepositoryError, services::TaskRegistryError};
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error returned by every handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The request collides with existing state.
    #[error("{0}")]
    Conflict(String),
    /// The request cannot be honoured in the current state.
    #[error("{0}")]
    BadRequest(String),
    /// The payload or query failed validation.
    #[error("{0}")]
    Validation(String),
    /// A prerequisite resource is missing.
    #[error("{0}")]
    Unavailable(String),
    /// The store failed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status for the error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the machine-readable error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unavailable(_) => "UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::Internal(_) => "internal server error".to_owned(),
            Self::NotFound(detail)
            | Self::Conflict(detail)
            | Self::BadRequest(detail)
            | Self::Validation(detail)
            | Self::Unavailable(detail) => detail.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(cause) = &self {
            error!(error = %cause, "request failed");
        }
        let status = self.status_code();
        let body = json!({
            "status": "error",
            "type": self.kind(),
            "code": status.as_u16(),
            "detail": self.detail(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<EmployeeDirectoryError> for ApiError {
    fn from(err: EmployeeDirectoryError) -> Self {
        let detail = err.to_string();
        match err {
            EmployeeDirectoryError::Domain(_) => Self::Validation(detail),
            EmployeeDirectoryError::NoFreeEmployees => Self::NotFound(detail),
            EmployeeDirectoryError::Repository(repo_err) => match repo_err {
                EmployeeRepositoryError::NotFound(_) => Self::NotFound(detail),
                EmployeeRepositoryError::DuplicateEmployee(_)
                | EmployeeRepositoryError::DuplicateEmail(_) => Self::Conflict(detail),
                EmployeeRepositoryError::HasAssignedTasks { .. } => Self::BadRequest(detail),
                EmployeeRepositoryError::Persistence(_) => Self::Internal(detail),
            },
        }
    }
}

impl From<TaskRegistryError> for ApiError {
    fn from(err: TaskRegistryError) -> Self {
        let detail = err.to_string();
        match err {
            TaskRegistryError::Domain(_) => Self::Validation(detail),
            TaskRegistryError::Repository(repo_err) => match repo_err {
                TaskRepositoryError::NotFound(_) => Self::NotFound(detail),
                TaskRepositoryError::DuplicateTask(_) | TaskRepositoryError::DuplicateName(_) => {
                    Self::Conflict(detail)
                }
                TaskRepositoryError::ParentNotFound(_)
                | TaskRepositoryError::ParentCycle { .. }
                | TaskRepositoryError::EmployeeNotFound(_) => Self::Validation(detail),
                TaskRepositoryError::Persistence(_) => Self::Internal(detail),
            },
        }
    }
}

impl From<AssignmentError> for ApiError {
    fn from(err: AssignmentError) -> Self {
        let detail = err.to_string();
        match err {
            AssignmentError::TaskNotFound(_) => Self::NotFound(detail),
            AssignmentError::Policy(_) => Self::Unavailable(detail),
            AssignmentError::Repository(_) => Self::Internal(detail),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let detail = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => Self::Validation(detail),
            _ => Self::BadRequest(detail),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}
