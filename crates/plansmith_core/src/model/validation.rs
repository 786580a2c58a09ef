//! Validation errors shared by model records.

use crate::model::resource::AssignmentId;
use crate::model::task::TaskId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Record-level invariant violations.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Identifier is the nil UUID.
    NilId,
    /// Task names itself as parent.
    SelfParent(TaskId),
    /// Planned `end_date` is earlier than `start_date`.
    ReversedSpan(TaskId),
    /// Actual end is earlier than actual start.
    ReversedActualSpan(TaskId),
    /// Planned duration is zero working days.
    ZeroDuration(TaskId),
    /// Assignment hours are negative or not finite.
    InvalidHours { assignment_id: AssignmentId, hours: f64 },
    /// Child task is not strictly deeper than its parent.
    LevelOrder { task_id: TaskId, parent_id: TaskId },
    /// Project setting outside its allowed range.
    InvalidConfig { field: &'static str },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "identifier must not be nil"),
            Self::SelfParent(id) => write!(f, "task cannot be its own parent: {id}"),
            Self::ReversedSpan(id) => write!(f, "task end date precedes start date: {id}"),
            Self::ReversedActualSpan(id) => {
                write!(f, "task actual end date precedes actual start date: {id}")
            }
            Self::ZeroDuration(id) => write!(f, "task duration must be at least one day: {id}"),
            Self::InvalidHours {
                assignment_id,
                hours,
            } => write!(f, "assignment {assignment_id} has invalid hours: {hours}"),
            Self::LevelOrder { task_id, parent_id } => write!(
                f,
                "task {task_id} must sit at a deeper level than its parent {parent_id}"
            ),
            Self::InvalidConfig { field } => write!(f, "project config has invalid {field}"),
        }
    }
}

impl Error for ValidationError {}
