//! Load-balancing assignment of tasks to employees.
//!
//! Given a task, the policy prefers an employee with no work, then the
//! employee already working on the task's parent (as long as that employee
//! is not too far ahead of the least-loaded one), and finally the
//! least-loaded employee. Stores run the read-decide-write sequence in one
//! transaction so concurrent assignments cannot act on the same snapshot.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
