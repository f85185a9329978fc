//! Domain model for the task registry.
//!
//! The task domain models creation with assignment-driven status promotion,
//! partial updates, parent links, and pagination while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod page;
mod status;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskId, TaskName};
pub use page::PageRequest;
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskChanges, TaskDraft};
