//! Scheduling domain model.
//!
//! # Responsibility
//! - Define the records the engine reads and writes: tasks, dependencies,
//!   resources, holidays, assignments and project configuration.
//! - Keep optional tracking data explicit (`Option`) instead of sentinel
//!   values.
//!
//! # Invariants
//! - Every record is identified by a stable, non-nil `Uuid`.
//! - A task is a leaf iff no other task names it as `parent_id`.
//! - Container task dates and duration are derived by rollup.

pub mod dependency;
pub mod project;
pub mod resource;
pub mod task;
pub mod validation;

pub use dependency::{Dependency, DependencyId};
pub use project::{ProjectConfig, ProjectId, ProjectSnapshot};
pub use resource::{
    AssignmentId, DateRange, Holiday, HolidayId, Resource, ResourceAssignment, ResourceCalendar,
    ResourceId, WeeklyAllocation,
};
pub use task::{Task, TaskId};
pub use validation::ValidationError;
