//! HTTP surface.
//!
//! An axum [`Router`](axum::Router) exposes the employee directory, the task
//! registry, and the assignment policy. Handlers translate requests into
//! service calls and map service errors onto [`ApiError`].

pub mod error;
pub mod extract;
pub mod handlers;
pub mod payload;
pub mod response;
pub mod routes;

#[cfg(test)]
mod tests;

pub use error::ApiError;
pub use routes::{AppState, create_router};
