//! Unit tests for the assignment policy.
