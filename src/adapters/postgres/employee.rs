//! Employee repository over `PostgreSQL`.

use super::{
    PostgresTrackerStore, TransactionError, in_transaction,
    models::{EmployeeRow, EmployeeWorkloadRow, NewEmployeeRow},
    schema::{employee, task},
};
use crate::employee::{
    domain::{
        EmailAddress, Employee, EmployeeDomainError, EmployeeId, EmployeeWorkload,
        PersistedEmployeeData, PersonName,
    },
    ports::{EmployeeRepository, EmployeeRepositoryError, EmployeeRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

const EMPLOYEE_EMAIL_UNIQUE: &str = "employee_email_unique";

const WORKLOAD_QUERY: &str = concat!(
    "SELECT e.id, e.email, e.last_name, e.first_name, e.patronymic, e.post, ",
    "e.created_at, e.updated_at, COUNT(t.id) AS task_count ",
    "FROM employee e LEFT JOIN task t ON t.employee_id = e.id ",
    "GROUP BY e.id ORDER BY e.id",
);

#[async_trait]
impl EmployeeRepository for PostgresTrackerStore {
    async fn store(&self, employee: &Employee) -> EmployeeRepositoryResult<()> {
        let employee_id = employee.id();
        let email = employee.email().clone();
        let new_row = to_new_row(employee);

        self.run_blocking(move |connection| {
            diesel::insert_into(employee::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_write_error(err, employee_id, &email))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, employee: &Employee) -> EmployeeRepositoryResult<()> {
        let employee_id = employee.id();
        let email = employee.email().clone();
        let NewEmployeeRow {
            id,
            email: email_column,
            last_name,
            first_name,
            patronymic,
            post,
            updated_at,
            ..
        } = to_new_row(employee);

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(employee::table.find(id))
                .set((
                    employee::email.eq(email_column),
                    employee::last_name.eq(last_name),
                    employee::first_name.eq(first_name),
                    employee::patronymic.eq(patronymic),
                    employee::post.eq(post),
                    employee::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(|err| map_write_error(err, employee_id, &email))?;

            if updated_count == 0 {
                return Err(EmployeeRepositoryError::NotFound(employee_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: EmployeeId) -> EmployeeRepositoryResult<()> {
        self.run_blocking(move |connection| {
            in_transaction(connection, |tx| delete_unassigned(tx, id))
        })
        .await
    }

    async fn find_by_id(&self, id: EmployeeId) -> EmployeeRepositoryResult<Option<Employee>> {
        self.run_blocking(move |connection| {
            let row = employee::table
                .find(id.into_inner())
                .select(EmployeeRow::as_select())
                .first::<EmployeeRow>(connection)
                .optional()
                .map_err(EmployeeRepositoryError::persistence)?;
            row.map(row_to_employee)
                .transpose()
                .map_err(EmployeeRepositoryError::persistence)
        })
        .await
    }

    async fn list_all(&self) -> EmployeeRepositoryResult<Vec<Employee>> {
        self.run_blocking(move |connection| {
            let rows = employee::table
                .select(EmployeeRow::as_select())
                .order(employee::id.asc())
                .load::<EmployeeRow>(connection)
                .map_err(EmployeeRepositoryError::persistence)?;
            rows.into_iter()
                .map(row_to_employee)
                .collect::<Result<Vec<_>, _>>()
                .map_err(EmployeeRepositoryError::persistence)
        })
        .await
    }

    async fn list_workloads(&self) -> EmployeeRepositoryResult<Vec<EmployeeWorkload>> {
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(WORKLOAD_QUERY)
                .load::<EmployeeWorkloadRow>(connection)
                .map_err(EmployeeRepositoryError::persistence)?;
            rows.into_iter().map(row_to_workload).collect()
        })
        .await
    }
}

/// Deletes the employee unless tasks still reference it.
///
/// The employee row is locked first, so a concurrent insert of a task
/// referencing it waits on the foreign-key check until this transaction ends.
fn delete_unassigned(
    connection: &mut PgConnection,
    id: EmployeeId,
) -> Result<(), TransactionError<EmployeeRepositoryError>> {
    let uuid = id.into_inner();
    let locked = employee::table
        .find(uuid)
        .select(employee::id)
        .for_update()
        .first::<uuid::Uuid>(connection)
        .optional()?;
    if locked.is_none() {
        return Err(TransactionError::Rejected(
            EmployeeRepositoryError::NotFound(id),
        ));
    }

    let counted = task::table
        .filter(task::employee_id.eq(uuid))
        .count()
        .get_result::<i64>(connection)?;
    let task_count = u64::try_from(counted)
        .map_err(|err| TransactionError::Rejected(EmployeeRepositoryError::persistence(err)))?;
    if task_count > 0 {
        return Err(TransactionError::Rejected(
            EmployeeRepositoryError::HasAssignedTasks { id, task_count },
        ));
    }

    diesel::delete(employee::table.find(uuid)).execute(connection)?;
    Ok(())
}

fn to_new_row(employee: &Employee) -> NewEmployeeRow {
    NewEmployeeRow {
        id: employee.id().into_inner(),
        email: employee.email().as_str().to_owned(),
        last_name: employee.last_name().as_str().to_owned(),
        first_name: employee.first_name().as_str().to_owned(),
        patronymic: employee.patronymic().map(str::to_owned),
        post: employee.post().map(str::to_owned),
        created_at: employee.created_at(),
        updated_at: employee.updated_at(),
    }
}

fn row_to_employee(row: EmployeeRow) -> Result<Employee, EmployeeDomainError> {
    let EmployeeRow {
        id,
        email,
        last_name,
        first_name,
        patronymic,
        post,
        created_at,
        updated_at,
    } = row;

    let data = PersistedEmployeeData {
        id: EmployeeId::from_uuid(id),
        email: EmailAddress::new(email)?,
        last_name: PersonName::new("last_name", last_name)?,
        first_name: PersonName::new("first_name", first_name)?,
        patronymic,
        post,
        created_at,
        updated_at,
    };
    Ok(Employee::from_persisted(data))
}

fn row_to_workload(row: EmployeeWorkloadRow) -> EmployeeRepositoryResult<EmployeeWorkload> {
    let load = u64::try_from(row.task_count).map_err(EmployeeRepositoryError::persistence)?;
    let employee = row_to_employee(row.employee).map_err(EmployeeRepositoryError::persistence)?;
    Ok(EmployeeWorkload::new(employee, load))
}

fn map_write_error(
    err: DieselError,
    employee_id: EmployeeId,
    email: &EmailAddress,
) -> EmployeeRepositoryError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &err {
        return if info.constraint_name() == Some(EMPLOYEE_EMAIL_UNIQUE) {
            EmployeeRepositoryError::DuplicateEmail(email.clone())
        } else {
            EmployeeRepositoryError::DuplicateEmployee(employee_id)
        };
    }
    EmployeeRepositoryError::persistence(err)
}
