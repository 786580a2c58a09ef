//! Task domain model.
//!
//! # Responsibility
//! - Define the scheduling-relevant projection of a WBS task.
//! - Provide constructors that keep `end_date` consistent with `duration`.
//!
//! # Invariants
//! - `end_date` is reached from `start_date` by `duration - 1` working-day
//!   steps (inclusive range).
//! - `duration` is user input for leaves and rollup output for containers.
//! - `actual_duration = None` means "not tracked", never zero.

use crate::calendar::{add_business_days, WorkingWeek};
use crate::model::resource::DateRange;
use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable task identifier.
pub type TaskId = Uuid;

/// One node of the WBS forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    /// Dotted WBS code, e.g. `1.2.3`. Empty when the host does not track codes.
    #[serde(default)]
    pub wbs_code: String,
    /// Containing task; `None` at root level.
    #[serde(default)]
    pub parent_id: Option<TaskId>,
    /// Depth in the forest, 0 at root. Orders bottom-up rollup.
    #[serde(default)]
    pub level: u32,
    /// Planned duration in working days.
    pub duration: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub actual_duration: Option<u32>,
    #[serde(default)]
    pub actual_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub actual_end_date: Option<NaiveDate>,
}

impl Task {
    /// Creates a root-level task with a generated id.
    ///
    /// `end_date` is derived from `start_date` and `duration` on `week`.
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        duration: u32,
        week: &WorkingWeek,
    ) -> Self {
        Self::build(Uuid::new_v4(), name.into(), start_date, duration, week)
    }

    /// Creates a root-level task with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: TaskId,
        name: impl Into<String>,
        start_date: NaiveDate,
        duration: u32,
        week: &WorkingWeek,
    ) -> Result<Self, ValidationError> {
        if id.is_nil() {
            return Err(ValidationError::NilId);
        }
        Ok(Self::build(id, name.into(), start_date, duration, week))
    }

    fn build(
        id: TaskId,
        name: String,
        start_date: NaiveDate,
        duration: u32,
        week: &WorkingWeek,
    ) -> Self {
        Self {
            id,
            name,
            wbs_code: String::new(),
            parent_id: None,
            level: 0,
            duration,
            start_date,
            end_date: add_business_days(start_date, duration.saturating_sub(1), week),
            actual_duration: None,
            actual_start_date: None,
            actual_end_date: None,
        }
    }

    /// Places this task directly under `parent`, one level deeper.
    pub fn under(mut self, parent: &Task) -> Self {
        self.parent_id = Some(parent.id);
        self.level = parent.level + 1;
        self
    }

    /// Sets the WBS code.
    pub fn with_wbs_code(mut self, code: impl Into<String>) -> Self {
        self.wbs_code = code.into();
        self
    }

    /// Planned inclusive span.
    pub fn span(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Whether actual tracking data marks this task complete.
    pub fn is_complete(&self) -> bool {
        self.actual_duration.is_some()
    }

    /// Checks record-level invariants.
    ///
    /// Hierarchy-wide rules (leaf-ness, rollup envelope) are enforced by the
    /// schedule module, not here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId);
        }
        if self.parent_id == Some(self.id) {
            return Err(ValidationError::SelfParent(self.id));
        }
        if self.duration == 0 {
            return Err(ValidationError::ZeroDuration(self.id));
        }
        if self.end_date < self.start_date {
            return Err(ValidationError::ReversedSpan(self.id));
        }
        if let (Some(start), Some(end)) = (self.actual_start_date, self.actual_end_date) {
            if end < start {
                return Err(ValidationError::ReversedActualSpan(self.id));
            }
        }
        Ok(())
    }
}
