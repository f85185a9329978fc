//! Diesel row models for employee and task persistence.

use super::schema::{employee, task};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for employee records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = employee)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmployeeRow {
    /// Employee identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Email address.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub email: String,
    /// Last name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub last_name: String,
    /// First name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub first_name: String,
    /// Optional patronymic.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Varchar>)]
    pub patronymic: Option<String>,
    /// Optional job title.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Varchar>)]
    pub post: Option<String>,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for employee records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employee)]
pub struct NewEmployeeRow {
    /// Employee identifier.
    pub id: uuid::Uuid,
    /// Email address.
    pub email: String,
    /// Last name.
    pub last_name: String,
    /// First name.
    pub first_name: String,
    /// Optional patronymic.
    pub patronymic: Option<String>,
    /// Optional job title.
    pub post: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Employee row joined with its task count.
#[derive(Debug, Clone, QueryableByName)]
pub struct EmployeeWorkloadRow {
    /// Employee columns.
    #[diesel(embed)]
    pub employee: EmployeeRow,
    /// Number of tasks referencing the employee.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub task_count: i64,
}

/// Employee identifier with its task count, read while assigning.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub struct CandidateRow {
    /// Employee identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub employee_id: uuid::Uuid,
    /// Number of tasks referencing the employee.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub task_count: i64,
}

/// Result of the ancestor walk run before re-parenting a task.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub struct AncestryRow {
    /// Whether the task appears among the new parent's ancestors.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub creates_cycle: bool,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = task)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Task name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub name: String,
    /// Task description.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub content: String,
    /// Optional deadline.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub period_of_execution: Option<DateTime<Utc>>,
    /// Optional parent task.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Uuid>)]
    pub parent_id: Option<uuid::Uuid>,
    /// Status code.
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub status: i32,
    /// Optional assigned employee.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Uuid>)]
    pub employee_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task name.
    pub name: String,
    /// Task description.
    pub content: String,
    /// Optional deadline.
    pub period_of_execution: Option<DateTime<Utc>>,
    /// Optional parent task.
    pub parent_id: Option<uuid::Uuid>,
    /// Status code.
    pub status: i32,
    /// Optional assigned employee.
    pub employee_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
