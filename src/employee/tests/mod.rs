//! Unit tests for the employee directory.
