//! Domain model for task assignment.

mod error;
mod policy;
mod snapshot;

pub use error::AssignmentPolicyError;
pub use policy::{AssignmentPolicy, Candidate, Selection, SelectionReason};
pub use snapshot::{Assignment, AssignmentSnapshot};
