//! Finish-to-start dependency edge.

use crate::model::task::TaskId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable dependency identifier.
pub type DependencyId = Uuid;

/// Directed edge: `successor_id` may not start before `predecessor_id` ends,
/// plus `lag` working days.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub id: DependencyId,
    pub predecessor_id: TaskId,
    pub successor_id: TaskId,
    /// Extra working days inserted after the predecessor ends.
    #[serde(default)]
    pub lag: u32,
}

impl Dependency {
    /// Creates a zero-lag edge with a generated id.
    pub fn new(predecessor_id: TaskId, successor_id: TaskId) -> Self {
        Self {
            id: Uuid::new_v4(),
            predecessor_id,
            successor_id,
            lag: 0,
        }
    }

    pub fn with_lag(mut self, lag: u32) -> Self {
        self.lag = lag;
        self
    }

    pub fn is_self_loop(&self) -> bool {
        self.predecessor_id == self.successor_id
    }
}
