//! Deterministic, pure logic shared by piplock commands.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! strings and return deterministic outputs suitable for tests.

pub mod ini;
pub mod requirements;
