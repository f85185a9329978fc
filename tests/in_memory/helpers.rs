//! Shared fixtures for in-memory store integration tests.

use rstest::fixture;
use std::io;
use task_tracker::adapters::memory::InMemoryTrackerStore;
use tokio::runtime::Runtime;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a fresh store for each test.
#[fixture]
pub fn store() -> InMemoryTrackerStore {
    InMemoryTrackerStore::new()
}
