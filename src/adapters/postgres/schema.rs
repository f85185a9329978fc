//! Diesel schema for employee and task persistence.

diesel::table! {
    /// Employee records.
    employee (id) {
        /// Employee identifier.
        id -> Uuid,
        /// Unique email address.
        email -> Varchar,
        /// Last name.
        last_name -> Varchar,
        /// First name.
        first_name -> Varchar,
        /// Optional patronymic.
        patronymic -> Nullable<Varchar>,
        /// Optional job title.
        post -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records with optional parent and assignee links.
    task (id) {
        /// Task identifier.
        id -> Uuid,
        /// Unique task name.
        name -> Varchar,
        /// Task description.
        content -> Text,
        /// Optional deadline.
        period_of_execution -> Nullable<Timestamptz>,
        /// Optional parent task.
        parent_id -> Nullable<Uuid>,
        /// Status code (0 open, 1 in progress).
        status -> Integer,
        /// Optional assigned employee.
        employee_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(task -> employee (employee_id));
diesel::allow_tables_to_appear_in_same_query!(employee, task);
