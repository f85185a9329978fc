//! Task tracker: employee and task records with load-aware assignment.
//!
//! This crate provides the domain model, persistence adapters, and HTTP
//! surface for a small service that tracks employees, the tasks assigned to
//! them, and a policy that hands a task to the most suitable employee.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, in-memory)
//! - **Services**: Orchestration of domain values and ports
//!
//! # Modules
//!
//! - [`employee`]: Employee directory and workload queries
//! - [`task`]: Task registry with parent links and pagination
//! - [`assignment`]: Load-balancing assignment policy
//! - [`adapters`]: Stores implementing every repository port
//! - [`api`]: axum router, handlers, and error mapping
//! - [`settings`]: Layered service configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod adapters;
pub mod api;
pub mod assignment;
pub mod employee;
pub mod settings;
pub mod task;
pub mod telemetry;
pub mod update_value;
