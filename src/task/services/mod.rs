//! Application services for the task registry.

mod registry;

pub use registry::{
    CreateTaskRequest, TaskRegistryError, TaskRegistryResult, TaskRegistryService,
    UpdateTaskRequest,
};
