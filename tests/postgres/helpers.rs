//! Container lifecycle for `PostgreSQL` integration tests.

pub use crate::test_helpers::BoxError;
use std::time::Duration;
use task_tracker::adapters::postgres::{PostgresTrackerStore, apply_migrations, build_pool};
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;

/// A migrated store bound to a running container.
///
/// The container stops when this value is dropped.
pub struct PostgresFixture {
    /// Store connected to the container.
    pub store: PostgresTrackerStore,
    _container: ContainerAsync<Postgres>,
}

/// Starts a container, applies the schema, and connects a store.
///
/// # Errors
///
/// Returns an error if the container cannot start, the pool cannot connect,
/// or the schema cannot be applied.
pub async fn postgres_store() -> Result<PostgresFixture, BoxError> {
    let container = Postgres::default().start().await?;
    let host = container.get_host().await?;
    let port = container.get_host_port_ipv4(5432).await?;
    let url = format!("postgres://postgres:postgres@{host}:{port}/postgres");

    let pool =
        tokio::task::spawn_blocking(move || build_pool(&url, 4, Duration::from_secs(30)))
            .await??;
    apply_migrations(&pool).await?;
    // Applying the schema twice must be harmless.
    apply_migrations(&pool).await?;

    Ok(PostgresFixture {
        store: PostgresTrackerStore::new(pool),
        _container: container,
    })
}
