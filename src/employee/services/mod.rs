//! Application services for the employee directory.

mod directory;

pub use directory::{
    CreateEmployeeRequest, EmployeeDirectoryError, EmployeeDirectoryResult,
    EmployeeDirectoryService, UpdateEmployeeRequest,
};
