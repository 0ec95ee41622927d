//! Core domain logic for course grade distribution tracking.
//!
//! Validated grade-scale types, run-length-encoded distributions with
//! deterministic identifiers, and an integrity gate for submitted page
//! content. The crate is pure and performs no I/O; the embedding
//! service owns transport, persistence, and auth.

pub mod course;
pub mod distribution;
pub mod error;
pub mod integrity;
pub mod logging;
pub mod report;
pub mod scale;
pub mod segment;
pub mod semester;
