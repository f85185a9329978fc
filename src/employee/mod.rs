//! Employee directory for the task tracker.
//!
//! Employees are the people tasks get assigned to. Besides plain CRUD the
//! directory answers workload questions: who carries tasks ("busy"), who
//! carries none ("free"), and how many tasks each employee holds. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]
//!
//! Adapters live in [`crate::adapters`] because the load of an employee is
//! derived from task rows and both must be read from the same store.

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
