//! Stores implementing the employee, task, and assignment ports.
//!
//! An employee's load is derived from task rows, and assignment reads both
//! tables in one transaction, so each store implements every repository
//! port over a single shared backend.

pub mod memory;
pub mod postgres;
