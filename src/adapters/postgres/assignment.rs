//! Assignment repository over `PostgreSQL`.
//!
//! Each assignment runs in one transaction that first takes a
//! transaction-scoped advisory lock, so two assignments never compute loads
//! from the same snapshot, and then locks the task row.

use super::{
    PostgresTrackerStore, TransactionError, in_transaction,
    models::{CandidateRow, TaskRow},
    schema::task,
    task::row_to_task,
};
use crate::assignment::{
    domain::{Assignment, AssignmentPolicy, AssignmentSnapshot, Candidate},
    ports::{AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult},
};
use crate::employee::domain::EmployeeId;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

/// Advisory lock key shared by every assignment transaction.
const ASSIGNMENT_LOCK_KEY: i64 = 0x7461_736b_6173_7367;

const CANDIDATE_QUERY: &str = concat!(
    "SELECT e.id AS employee_id, COUNT(t.id) AS task_count ",
    "FROM employee e LEFT JOIN task t ON t.employee_id = e.id ",
    "GROUP BY e.id ORDER BY e.id",
);

#[async_trait]
impl AssignmentRepository for PostgresTrackerStore {
    async fn assign_task(
        &self,
        task_id: TaskId,
        policy: AssignmentPolicy,
        assigned_at: DateTime<Utc>,
    ) -> AssignmentRepositoryResult<Assignment> {
        self.run_blocking(move |connection| {
            in_transaction(connection, |tx| {
                assign_locked(tx, task_id, policy, assigned_at)
            })
        })
        .await
    }
}

type AssignTxResult<T> = Result<T, TransactionError<AssignmentRepositoryError>>;

fn assign_locked(
    connection: &mut PgConnection,
    task_id: TaskId,
    policy: AssignmentPolicy,
    assigned_at: DateTime<Utc>,
) -> AssignTxResult<Assignment> {
    diesel::sql_query("SELECT pg_advisory_xact_lock($1)")
        .bind::<BigInt, _>(ASSIGNMENT_LOCK_KEY)
        .execute(connection)?;

    let snapshot = load_snapshot(connection, task_id)?;
    let assignment = snapshot
        .decide(policy, assigned_at)
        .map_err(|err| TransactionError::Rejected(err.into()))?;

    let assigned = assignment.task();
    diesel::update(task::table.find(task_id.into_inner()))
        .set((
            task::employee_id.eq(assigned.employee_id().map(EmployeeId::into_inner)),
            task::status.eq(assigned.status().code()),
            task::updated_at.eq(assigned.updated_at()),
        ))
        .execute(connection)?;

    Ok(assignment)
}

fn load_snapshot(connection: &mut PgConnection, task_id: TaskId) -> AssignTxResult<AssignmentSnapshot> {
    let task_row = task::table
        .find(task_id.into_inner())
        .select(TaskRow::as_select())
        .for_update()
        .first::<TaskRow>(connection)
        .optional()?
        .ok_or(TransactionError::Rejected(
            AssignmentRepositoryError::TaskNotFound(task_id),
        ))?;
    let current = row_to_task(task_row)
        .map_err(|err| TransactionError::Rejected(AssignmentRepositoryError::persistence(err)))?;

    let parent_assignee = match current.parent_id() {
        Some(parent_id) => task::table
            .find(parent_id.into_inner())
            .select(task::employee_id)
            .first::<Option<uuid::Uuid>>(connection)
            .optional()?
            .flatten()
            .map(EmployeeId::from_uuid),
        None => None,
    };

    let candidates = diesel::sql_query(CANDIDATE_QUERY)
        .load::<CandidateRow>(connection)?
        .into_iter()
        .map(|candidate| {
            u64::try_from(candidate.task_count)
                .map(|load| Candidate::new(EmployeeId::from_uuid(candidate.employee_id), load))
                .map_err(|err| TransactionError::Rejected(AssignmentRepositoryError::persistence(err)))
        })
        .collect::<AssignTxResult<Vec<_>>>()?;

    Ok(AssignmentSnapshot::new(current, parent_assignee, candidates))
}
