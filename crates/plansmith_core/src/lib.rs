//! Scheduling engine core for plansmith.
//!
//! Plans tasks over working-day calendars: finish-to-start propagation,
//! hierarchical rollup, critical path analysis and weekly resource-hour
//! allocation. Storage and UI live in host layers behind
//! [`repo::ProjectRepository`].

pub mod calendar;
pub mod graph;
pub mod logging;
pub mod model;
pub mod repo;
pub mod resource;
pub mod schedule;
pub mod service;
pub mod wbs;

pub use calendar::WorkingWeek;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::{
    Dependency, Holiday, ProjectConfig, ProjectSnapshot, Resource, ResourceAssignment, Task,
    ValidationError,
};
pub use repo::{InMemoryProjectRepository, ProjectRepository, RepoError, RepoResult};
pub use schedule::{
    analyze_critical_path, calculate_actual_dates, calculate_critical_path,
    recalculate_task_dates, rollup_parent_dates, CriticalPathAnalysis, PropagationOutcome,
    ScheduleError, ScheduleResult, TaskWithCpm,
};
pub use service::{ScheduleReport, ScheduleService, ServiceError, ServiceResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
