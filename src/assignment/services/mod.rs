//! Application services for task assignment.

mod assign;

pub use assign::{AssignmentError, AssignmentResult, AssignmentService};
