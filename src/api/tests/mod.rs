//! Unit tests for error mapping and request payloads.
