//! Domain model for the employee directory.

mod employee;
mod error;
mod ids;
mod workload;

pub use employee::{Employee, EmployeeChanges, EmployeeProfile, PersistedEmployeeData};
pub use error::EmployeeDomainError;
pub use ids::{EmailAddress, EmployeeId, PersonName};
pub use workload::{EmployeeWorkload, sort_busiest_first};
