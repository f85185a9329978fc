//! `PostgreSQL` store backed by Diesel and an r2d2 connection pool.
//!
//! Diesel is synchronous, so every repository call checks a connection out
//! of the pool inside [`tokio::task::spawn_blocking`].

mod assignment;
mod employee;
mod models;
mod schema;
mod task;

use crate::assignment::ports::AssignmentRepositoryError;
use crate::employee::ports::EmployeeRepositoryError;
use crate::task::ports::TaskRepositoryError;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::Error as DieselError;
use diesel::Connection;
use std::time::Duration;
use thiserror::Error;

/// `PostgreSQL` connection pool type used by the store.
pub type TrackerPgPool = Pool<ConnectionManager<PgConnection>>;

/// SQL creating the `employee` and `task` tables. Safe to apply repeatedly.
pub const SCHEMA_SQL: &str =
    include_str!("../../../migrations/2026-10-01-000000_create_employee_and_task/up.sql");

/// Builds a connection pool.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened
/// within `connect_timeout`.
pub fn build_pool(
    database_url: &str,
    max_connections: u32,
    connect_timeout: Duration,
) -> Result<TrackerPgPool, PoolError> {
    Pool::builder()
        .max_size(max_connections)
        .connection_timeout(connect_timeout)
        .build(ConnectionManager::<PgConnection>::new(database_url))
}

/// Errors raised while applying the schema.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// No connection could be checked out.
    #[error("failed to acquire a connection: {0}")]
    Pool(#[from] PoolError),
    /// The schema SQL failed.
    #[error("failed to apply schema: {0}")]
    Sql(#[from] DieselError),
    /// The blocking task panicked or was cancelled.
    #[error("schema task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Applies [`SCHEMA_SQL`] through the pool.
///
/// # Errors
///
/// Returns [`MigrationError`] when a connection cannot be acquired or the SQL
/// fails.
pub async fn apply_migrations(pool: &TrackerPgPool) -> Result<(), MigrationError> {
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<(), MigrationError> {
        let mut connection = shared.get()?;
        connection.batch_execute(SCHEMA_SQL)?;
        Ok(())
    })
    .await?
}

/// `PostgreSQL`-backed store implementing every repository port.
#[derive(Debug, Clone)]
pub struct PostgresTrackerStore {
    pool: TrackerPgPool,
}

impl PostgresTrackerStore {
    /// Creates a new store from a connection pool.
    #[must_use]
    pub const fn new(pool: TrackerPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: PersistenceFailure + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(E::from_persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(E::from_persistence)?
    }
}

/// Port errors that can wrap an infrastructure failure.
trait PersistenceFailure: Sized {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

impl PersistenceFailure for EmployeeRepositoryError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceFailure for TaskRepositoryError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceFailure for AssignmentRepositoryError {
    fn from_persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

/// Failure inside a transaction: either the database failed or the
/// operation rejected the state it read. Both roll back.
enum TransactionError<E> {
    Database(DieselError),
    Rejected(E),
}

impl<E> From<DieselError> for TransactionError<E> {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

fn in_transaction<T, E, F>(connection: &mut PgConnection, f: F) -> Result<T, E>
where
    E: PersistenceFailure,
    F: FnOnce(&mut PgConnection) -> Result<T, TransactionError<E>>,
{
    connection
        .transaction(f)
        .map_err(|err| match err {
            TransactionError::Database(db_err) => E::from_persistence(db_err),
            TransactionError::Rejected(rejection) => rejection,
        })
}
