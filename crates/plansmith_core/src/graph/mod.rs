//! Dependency graph utilities.
//!
//! # Responsibility
//! - Build predecessor/successor adjacency and O(1) lag lookup from a flat
//!   dependency list.
//! - Produce a deterministic topological order (Kahn).
//! - Detect cycles before a dependency edit is accepted.
//!
//! # Invariants
//! - Edges whose endpoints are not in the task set are skipped, never fatal.
//! - Any cycle in a scheduled graph is a hard `ScheduleError`.

mod cycle;
mod dependency_graph;

pub use cycle::{detect_cycle, has_cycle, validate_dependency};
pub use dependency_graph::{DependencyGraph, Edge};
