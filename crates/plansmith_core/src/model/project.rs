//! Project configuration and in-memory snapshots.
//!
//! # Invariants
//! - `ProjectConfig` deserializes with defaults for every missing field.
//! - A valid snapshot places every child task deeper than its parent, so
//!   rollup by descending level sees children first.
//! - A snapshot is the unit the engine borrows per invocation; the engine
//!   returns new values and never mutates it.

use crate::calendar::WorkingWeek;
use crate::model::dependency::Dependency;
use crate::model::resource::{Holiday, HolidayId, ResourceAssignment, ResourceId};
use crate::model::task::{Task, TaskId};
use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Stable project identifier.
pub type ProjectId = Uuid;

const DEFAULT_HOURS_PER_DAY: f64 = 8.0;
const DEFAULT_TASK_DURATION: u32 = 1;

/// Calendar and scheduling settings of one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub working_days: WorkingWeek,
    pub hours_per_day: f64,
    /// Include global holidays in resource calculations.
    pub use_global_holidays: bool,
    pub excluded_global_holiday_ids: Vec<HolidayId>,
    pub project_specific_holidays: Vec<Holiday>,
    /// Duration given to newly created tasks.
    pub default_duration: u32,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            working_days: WorkingWeek::default(),
            hours_per_day: DEFAULT_HOURS_PER_DAY,
            use_global_holidays: true,
            excluded_global_holiday_ids: Vec::new(),
            project_specific_holidays: Vec::new(),
            default_duration: DEFAULT_TASK_DURATION,
        }
    }
}

impl ProjectConfig {
    /// Planned effort for `duration` working days at `hours_per_day`.
    pub fn planned_hours(&self, duration: u32) -> f64 {
        self.hours_per_day * f64::from(duration)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.hours_per_day.is_finite() || self.hours_per_day <= 0.0 {
            return Err(ValidationError::InvalidConfig {
                field: "hours_per_day",
            });
        }
        if self.default_duration == 0 {
            return Err(ValidationError::InvalidConfig {
                field: "default_duration",
            });
        }
        Ok(())
    }
}

/// Everything the engine needs about one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub config: ProjectConfig,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub assignments: Vec<ResourceAssignment>,
}

impl ProjectSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            config: ProjectConfig::default(),
            tasks: Vec::new(),
            dependencies: Vec::new(),
            assignments: Vec::new(),
        }
    }

    /// Validates the config, every task and assignment record, and the
    /// parent/child level ordering.
    ///
    /// Parents missing from the snapshot are not checked here; rollup treats
    /// such tasks as roots.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId);
        }
        self.config.validate()?;
        for task in &self.tasks {
            task.validate()?;
        }
        let levels: HashMap<TaskId, u32> =
            self.tasks.iter().map(|task| (task.id, task.level)).collect();
        for task in &self.tasks {
            let Some(parent_id) = task.parent_id else {
                continue;
            };
            if let Some(&parent_level) = levels.get(&parent_id) {
                if task.level <= parent_level {
                    return Err(ValidationError::LevelOrder {
                        task_id: task.id,
                        parent_id,
                    });
                }
            }
        }
        for assignment in &self.assignments {
            assignment.validate()?;
        }
        Ok(())
    }

    /// New root-level task lasting `config.default_duration` working days.
    pub fn new_task(&self, name: impl Into<String>, start_date: NaiveDate) -> Task {
        Task::new(
            name,
            start_date,
            self.config.default_duration.max(1),
            &self.config.working_days,
        )
    }

    /// Assignment of `resource_id` to `task_id` planned at the task's
    /// duration times `config.hours_per_day`. `None` for unknown tasks.
    pub fn assign_resource(
        &self,
        task_id: TaskId,
        resource_id: ResourceId,
    ) -> Option<ResourceAssignment> {
        let task = self.task(task_id)?;
        Some(ResourceAssignment::new(
            task_id,
            resource_id,
            self.config.planned_hours(task.duration),
        ))
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }
}
