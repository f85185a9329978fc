//! Request handlers, one module per resource.

pub mod employees;
pub mod overview;
pub mod tasks;
