//! Scheduling engine.
//!
//! # Responsibility
//! - Propagate leaf task dates through finish-to-start dependencies.
//! - Roll container dates up from their children (planned and actual).
//! - Run the critical path method over the same graph.
//! - Derive progress from actual tracking data.
//!
//! # Invariants
//! - Every operation borrows an input snapshot and returns new values.
//! - A dependency cycle aborts the whole computation; no partial result is
//!   returned.
//! - Container tasks are never propagation targets and never critical.

mod actual;
mod critical_path;
mod error;
pub mod hierarchy;
mod progress;
mod propagation;
mod rollup;

pub use actual::calculate_actual_dates;
pub use critical_path::{
    analyze_critical_path, calculate_critical_path, critical_path_sequence, critical_tasks,
    project_duration, CriticalPathAnalysis, TaskWithCpm,
};
pub use error::{ScheduleError, ScheduleResult};
pub use progress::{calculate_all_task_progress, calculate_task_progress};
pub use propagation::{
    recalculate_task_dates, recalculate_task_dates_with, schedule_changes, PropagationOptions,
    PropagationOutcome, ScheduleChange, DEFAULT_MAX_PASSES,
};
pub use rollup::{rollup_parent_actual_dates, rollup_parent_dates};
