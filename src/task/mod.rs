//! Task registry for the task tracker.
//!
//! Tasks form an optional parent/child hierarchy through `parent_id` and may
//! be assigned to an employee. The registry covers CRUD, paginated listings,
//! and the two derived views: open tasks ("free") and open tasks whose parent
//! is already in progress ("important"). The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
