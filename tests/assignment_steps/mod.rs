//! Step definitions for assignment policy scenarios.

mod given;
mod when;
pub mod world;
