//! Request bodies and query strings accepted by the handlers.

use crate::employee::{
    domain::EmployeeId,
    services::{CreateEmployeeRequest, UpdateEmployeeRequest},
};
use crate::task::{
    domain::{PageRequest, TaskDomainError, TaskId},
    services::{CreateTaskRequest, UpdateTaskRequest},
};
use crate::update_value::UpdateValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, de};
use std::fmt;
use uuid::Uuid;

/// Timestamp accepting the formats clients send for deadlines.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS±HH:MM`, a naive
/// `YYYY-MM-DDTHH:MM:SS` read as UTC, or a bare `YYYY-MM-DD` read as
/// midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexibleTimestamp(pub DateTime<Utc>);

impl FlexibleTimestamp {
    /// Parses a timestamp in one of the accepted formats.
    ///
    /// Returns `None` when no format matches.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Some(Self(parsed.with_timezone(&Utc)));
        }
        if let Ok(parsed) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%:z") {
            return Some(Self(parsed.with_timezone(&Utc)));
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
            return Some(Self(parsed.and_utc()));
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| Self(midnight.and_utc()))
    }
}

impl<'de> Deserialize<'de> for FlexibleTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TimestampVisitor;

        impl de::Visitor<'_> for TimestampVisitor {
            type Value = FlexibleTimestamp;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("an RFC 3339 timestamp or a YYYY-MM-DD date")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                FlexibleTimestamp::parse(value)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_str(TimestampVisitor)
    }
}

/// Body of `POST /employees/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployeeBody {
    email: String,
    last_name: String,
    first_name: String,
    #[serde(default)]
    patronymic: Option<String>,
    #[serde(default)]
    post: Option<String>,
}

impl From<CreateEmployeeBody> for CreateEmployeeRequest {
    fn from(body: CreateEmployeeBody) -> Self {
        let mut request = Self::new(body.email, body.last_name, body.first_name);
        if let Some(patronymic) = body.patronymic {
            request = request.with_patronymic(patronymic);
        }
        if let Some(post) = body.post {
            request = request.with_post(post);
        }
        request
    }
}

/// Body of `PATCH /employees/update/{id}`.
///
/// Missing fields are left alone; `null` clears an optional field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployeeBody {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    patronymic: UpdateValue<String>,
    #[serde(default)]
    post: UpdateValue<String>,
}

impl From<UpdateEmployeeBody> for UpdateEmployeeRequest {
    fn from(body: UpdateEmployeeBody) -> Self {
        let mut request = Self::new()
            .with_patronymic(body.patronymic)
            .with_post(body.post);
        if let Some(email) = body.email {
            request = request.with_email(email);
        }
        if let Some(last_name) = body.last_name {
            request = request.with_last_name(last_name);
        }
        if let Some(first_name) = body.first_name {
            request = request.with_first_name(first_name);
        }
        request
    }
}

/// Body of `POST /tasks/create/`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskBody {
    name: String,
    content: String,
    #[serde(default)]
    period_of_execution: Option<FlexibleTimestamp>,
    #[serde(default)]
    parent_id: Option<Uuid>,
    #[serde(default)]
    status: Option<i32>,
    #[serde(default)]
    employee_id: Option<Uuid>,
}

impl From<CreateTaskBody> for CreateTaskRequest {
    fn from(body: CreateTaskBody) -> Self {
        let mut request = Self::new(body.name, body.content);
        if let Some(FlexibleTimestamp(period)) = body.period_of_execution {
            request = request.with_period_of_execution(period);
        }
        if let Some(parent_id) = body.parent_id {
            request = request.with_parent(TaskId::from_uuid(parent_id));
        }
        if let Some(status) = body.status {
            request = request.with_status(status);
        }
        if let Some(employee_id) = body.employee_id {
            request = request.with_employee(EmployeeId::from_uuid(employee_id));
        }
        request
    }
}

/// Body of `PATCH /tasks/update/{id}`.
///
/// Missing fields are left alone; `null` clears an optional field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    period_of_execution: UpdateValue<FlexibleTimestamp>,
    #[serde(default)]
    parent_id: UpdateValue<Uuid>,
    #[serde(default)]
    status: Option<i32>,
    #[serde(default)]
    employee_id: UpdateValue<Uuid>,
}

impl From<UpdateTaskBody> for UpdateTaskRequest {
    fn from(body: UpdateTaskBody) -> Self {
        let mut request = Self::new()
            .with_period_of_execution(body.period_of_execution.map(|FlexibleTimestamp(at)| at))
            .with_parent(body.parent_id.map(TaskId::from_uuid))
            .with_employee(body.employee_id.map(EmployeeId::from_uuid));
        if let Some(name) = body.name {
            request = request.with_name(name);
        }
        if let Some(content) = body.content {
            request = request.with_content(content);
        }
        if let Some(status) = body.status {
            request = request.with_status(status);
        }
        request
    }
}

/// `limit` and `page` query parameters of the task listings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    page: Option<u32>,
}

impl TryFrom<PageQuery> for PageRequest {
    type Error = TaskDomainError;

    fn try_from(query: PageQuery) -> Result<Self, Self::Error> {
        Self::new(
            query.limit.unwrap_or(Self::DEFAULT_LIMIT),
            query.page.unwrap_or(1),
        )
    }
}
