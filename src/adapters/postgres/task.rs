//! Task repository over `PostgreSQL`.

use super::{
    PostgresTrackerStore, TransactionError, in_transaction,
    models::{AncestryRow, NewTaskRow, TaskRow},
    schema::task,
};
use crate::employee::domain::EmployeeId;
use crate::task::{
    domain::{PageRequest, PersistedTaskData, Task, TaskDomainError, TaskId, TaskName, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{BigInt, Integer, Uuid as SqlUuid};

const TASK_NAME_UNIQUE: &str = "task_name_unique";
const TASK_PARENT_FK: &str = "task_parent_fk";
const TASK_EMPLOYEE_FK: &str = "task_employee_fk";

/// Advisory lock key shared by every update of a task with a parent.
const TASK_TREE_LOCK_KEY: i64 = 0x7461_736b_7472_6565;

/// True when `$2` is `$1` or one of its ancestors. `UNION` stops the walk on
/// rows already seen.
const CYCLE_QUERY: &str = concat!(
    "WITH RECURSIVE ancestors(id, parent_id) AS (",
    "SELECT id, parent_id FROM task WHERE id = $1 ",
    "UNION SELECT t.id, t.parent_id FROM task t JOIN ancestors a ON t.id = a.parent_id",
    ") SELECT EXISTS (SELECT 1 FROM ancestors WHERE id = $2) AS creates_cycle",
);

const IMPORTANT_QUERY: &str = concat!(
    "SELECT t.id, t.name, t.content, t.period_of_execution, t.parent_id, t.status, ",
    "t.employee_id, t.created_at, t.updated_at ",
    "FROM task t JOIN task p ON p.id = t.parent_id ",
    "WHERE t.status = $1 AND p.status = $2 ",
    "ORDER BY t.created_at, t.id LIMIT $3 OFFSET $4",
);

/// Foreign keys and identity of a task, kept to translate constraint
/// violations into port errors.
#[derive(Debug, Clone)]
struct TaskKeys {
    id: TaskId,
    name: TaskName,
    parent_id: Option<TaskId>,
    employee_id: Option<EmployeeId>,
}

impl TaskKeys {
    fn of(task: &Task) -> Self {
        Self {
            id: task.id(),
            name: task.name().clone(),
            parent_id: task.parent_id(),
            employee_id: task.employee_id(),
        }
    }
}

#[async_trait]
impl TaskRepository for PostgresTrackerStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let keys = TaskKeys::of(task);
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(task::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_write_error(err, &keys))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let keys = TaskKeys::of(task);
        let row = to_new_row(task);

        self.run_blocking(move |connection| {
            in_transaction(connection, |tx| update_checked(tx, &keys, row))
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(task::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted_count == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = task::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task)
                .transpose()
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn list(&self, page: PageRequest) -> TaskRepositoryResult<Vec<Task>> {
        let (limit, offset) = page_bounds(page);
        self.run_blocking(move |connection| {
            let rows = task::table
                .select(TaskRow::as_select())
                .order((task::created_at.asc(), task::id.asc()))
                .limit(limit)
                .offset(offset)
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows_to_tasks(rows)
        })
        .await
    }

    async fn list_open(&self, page: PageRequest) -> TaskRepositoryResult<Vec<Task>> {
        let (limit, offset) = page_bounds(page);
        self.run_blocking(move |connection| {
            let rows = task::table
                .filter(task::status.eq(TaskStatus::Open.code()))
                .select(TaskRow::as_select())
                .order((task::created_at.asc(), task::id.asc()))
                .limit(limit)
                .offset(offset)
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows_to_tasks(rows)
        })
        .await
    }

    async fn list_important(&self, page: PageRequest) -> TaskRepositoryResult<Vec<Task>> {
        let (limit, offset) = page_bounds(page);
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(IMPORTANT_QUERY)
                .bind::<Integer, _>(TaskStatus::Open.code())
                .bind::<Integer, _>(TaskStatus::InProgress.code())
                .bind::<BigInt, _>(limit)
                .bind::<BigInt, _>(offset)
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows_to_tasks(rows)
        })
        .await
    }

    async fn list_assigned(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = task::table
                .filter(task::employee_id.is_not_null())
                .select(TaskRow::as_select())
                .order((task::created_at.asc(), task::id.asc()))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows_to_tasks(rows)
        })
        .await
    }
}

/// Converts a page into SQL `LIMIT`/`OFFSET` values.
///
/// Offsets past `i64::MAX` select nothing either way, so they are clamped.
fn page_bounds(page: PageRequest) -> (i64, i64) {
    let limit = i64::from(page.limit());
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
    (limit, offset)
}

type TaskTxResult<T> = Result<T, TransactionError<TaskRepositoryError>>;

/// Rewrites a task row.
///
/// A task with a parent first takes the tree lock and checks that the parent
/// does not descend from it, so concurrent re-parenting cannot close a loop.
fn update_checked(connection: &mut PgConnection, keys: &TaskKeys, row: NewTaskRow) -> TaskTxResult<()> {
    if let Some(parent_id) = keys.parent_id {
        diesel::sql_query("SELECT pg_advisory_xact_lock($1)")
            .bind::<BigInt, _>(TASK_TREE_LOCK_KEY)
            .execute(connection)?;
        let ancestry = diesel::sql_query(CYCLE_QUERY)
            .bind::<SqlUuid, _>(parent_id.into_inner())
            .bind::<SqlUuid, _>(keys.id.into_inner())
            .get_result::<AncestryRow>(connection)?;
        if ancestry.creates_cycle {
            return Err(TransactionError::Rejected(TaskRepositoryError::ParentCycle {
                task: keys.id,
                parent: parent_id,
            }));
        }
    }

    let NewTaskRow {
        id,
        name,
        content,
        period_of_execution,
        parent_id,
        status,
        employee_id,
        updated_at,
        ..
    } = row;
    let updated_count = diesel::update(task::table.find(id))
        .set((
            task::name.eq(name),
            task::content.eq(content),
            task::period_of_execution.eq(period_of_execution),
            task::parent_id.eq(parent_id),
            task::status.eq(status),
            task::employee_id.eq(employee_id),
            task::updated_at.eq(updated_at),
        ))
        .execute(connection)
        .map_err(|err| TransactionError::Rejected(map_write_error(err, keys)))?;

    if updated_count == 0 {
        return Err(TransactionError::Rejected(TaskRepositoryError::NotFound(
            keys.id,
        )));
    }
    Ok(())
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        name: task.name().as_str().to_owned(),
        content: task.content().to_owned(),
        period_of_execution: task.period_of_execution(),
        parent_id: task.parent_id().map(TaskId::into_inner),
        status: task.status().code(),
        employee_id: task.employee_id().map(EmployeeId::into_inner),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

pub(super) fn row_to_task(row: TaskRow) -> Result<Task, TaskDomainError> {
    let TaskRow {
        id,
        name,
        content,
        period_of_execution,
        parent_id,
        status,
        employee_id,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        name: TaskName::new(name)?,
        content,
        period_of_execution,
        parent_id: parent_id.map(TaskId::from_uuid),
        status: TaskStatus::try_from(status)?,
        employee_id: employee_id.map(EmployeeId::from_uuid),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn rows_to_tasks(rows: Vec<TaskRow>) -> TaskRepositoryResult<Vec<Task>> {
    rows.into_iter()
        .map(row_to_task)
        .collect::<Result<Vec<_>, _>>()
        .map_err(TaskRepositoryError::persistence)
}

fn map_write_error(err: DieselError, keys: &TaskKeys) -> TaskRepositoryError {
    if let DieselError::DatabaseError(kind, info) = &err {
        let constraint = info.constraint_name();
        match kind {
            DatabaseErrorKind::UniqueViolation if constraint == Some(TASK_NAME_UNIQUE) => {
                return TaskRepositoryError::DuplicateName(keys.name.clone());
            }
            DatabaseErrorKind::UniqueViolation => {
                return TaskRepositoryError::DuplicateTask(keys.id);
            }
            DatabaseErrorKind::ForeignKeyViolation if constraint == Some(TASK_PARENT_FK) => {
                if let Some(parent_id) = keys.parent_id {
                    return TaskRepositoryError::ParentNotFound(parent_id);
                }
            }
            DatabaseErrorKind::ForeignKeyViolation if constraint == Some(TASK_EMPLOYEE_FK) => {
                if let Some(employee_id) = keys.employee_id {
                    return TaskRepositoryError::EmployeeNotFound(employee_id);
                }
            }
            _ => {}
        }
    }
    TaskRepositoryError::persistence(err)
}
