//! Scheduling engine errors.

use crate::model::TaskId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by engine operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Hard failures of the scheduling engine.
///
/// Recoverable conditions (bad working-week config, dangling dependency,
/// pass limit) are logged and never surface here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The dependency set contains a cycle; `unresolved` lists the tasks
    /// topological ordering could not place, in input order.
    CyclicDependency { unresolved: Vec<TaskId> },
    /// Proposed edge points a task at itself.
    SelfDependency(TaskId),
    /// Proposed edge would close a cycle.
    DependencyCycle {
        predecessor_id: TaskId,
        successor_id: TaskId,
    },
    /// Proposed edge names a task outside the current task set.
    UnknownTask(TaskId),
}

impl ScheduleError {
    /// Whether this error reports a dependency cycle, either existing or
    /// proposed.
    pub fn is_cycle(&self) -> bool {
        matches!(
            self,
            Self::CyclicDependency { .. } | Self::SelfDependency(_) | Self::DependencyCycle { .. }
        )
    }
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CyclicDependency { unresolved } => write!(
                f,
                "circular dependencies detected among {} task(s); cannot schedule",
                unresolved.len()
            ),
            Self::SelfDependency(id) => write!(f, "task cannot depend on itself: {id}"),
            Self::DependencyCycle {
                predecessor_id,
                successor_id,
            } => write!(
                f,
                "dependency {predecessor_id} -> {successor_id} would create a cycle"
            ),
            Self::UnknownTask(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for ScheduleError {}
