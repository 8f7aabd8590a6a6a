//! Deterministic, pure logic for people reassignment.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! documents and return deterministic outputs suitable for tests.

pub mod extract;
pub mod fields;
pub mod reassign;
pub mod types;
