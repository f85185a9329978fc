//! Port contracts for task assignment.

pub mod repository;

pub use repository::{
    AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult,
};
