//! Resource, holiday and assignment records.
//!
//! # Invariants
//! - `DateRange` is inclusive on both ends; `end < start` is an empty range.
//! - A holiday with no `applies_to` tags applies to every resource.
//! - An assignment with `is_manual_distribution` keeps its weekly
//!   distribution across recalculations.

use crate::calendar::WorkingWeek;
use crate::model::task::TaskId;
use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ResourceId = Uuid;
pub type HolidayId = Uuid;
pub type AssignmentId = Uuid;

/// Inclusive calendar-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Overlap of two ranges, `None` when disjoint.
    pub fn intersection(&self, other: &DateRange) -> Option<DateRange> {
        let overlap = DateRange::new(self.start.max(other.start), self.end.min(other.end));
        (!overlap.is_empty()).then_some(overlap)
    }

    /// Calendar days of the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |day| *day <= self.end)
    }
}

/// Per-resource availability overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCalendar {
    #[serde(default)]
    pub vacations: Vec<DateRange>,
    /// Replaces the project working week for this resource when set.
    #[serde(default)]
    pub custom_working_days: Option<WorkingWeek>,
}

impl ResourceCalendar {
    pub fn is_on_vacation(&self, date: NaiveDate) -> bool {
        self.vacations.iter().any(|range| range.contains(date))
    }
}

/// A person or team that task hours are assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    /// Skill/location tags, also matched against holiday `applies_to`.
    #[serde(default)]
    pub tags: Vec<String>,
    pub max_hours_per_week: f64,
    #[serde(default)]
    pub calendar: ResourceCalendar,
}

impl Resource {
    pub fn new(name: impl Into<String>, max_hours_per_week: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tags: Vec::new(),
            max_hours_per_week,
            calendar: ResourceCalendar::default(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_vacation(mut self, range: DateRange) -> Self {
        self.calendar.vacations.push(range);
        self
    }

    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|tag| self.tags.contains(tag))
    }
}

/// Non-working calendar day, global or project-specific.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: HolidayId,
    pub name: String,
    pub date: NaiveDate,
    /// Resource tags this holiday is limited to; empty applies to everyone.
    #[serde(default)]
    pub applies_to: Vec<String>,
}

impl Holiday {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date,
            applies_to: Vec::new(),
        }
    }

    pub fn restricted_to<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.applies_to = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this holiday removes a working day for `resource`.
    ///
    /// Without a resource only unrestricted holidays apply.
    pub fn applies_to_resource(&self, resource: Option<&Resource>) -> bool {
        if self.applies_to.is_empty() {
            return true;
        }
        resource.is_some_and(|resource| resource.has_any_tag(&self.applies_to))
    }
}

/// Hours of one assignment that fall into one Monday-anchored week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAllocation {
    /// Monday of the week.
    pub week_start: NaiveDate,
    /// Available working days of the assignment inside this week.
    pub working_days_in_week: u32,
    pub planned_hours: f64,
    #[serde(default)]
    pub actual_hours: Option<f64>,
}

/// Resource hours booked against one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceAssignment {
    pub id: AssignmentId,
    pub task_id: TaskId,
    pub resource_id: ResourceId,
    pub planned_hours: f64,
    #[serde(default)]
    pub actual_hours: Option<f64>,
    #[serde(default)]
    pub weekly_distribution: Vec<WeeklyAllocation>,
    /// Manual edits are sticky and never silently recomputed.
    #[serde(default)]
    pub is_manual_distribution: bool,
}

impl ResourceAssignment {
    pub fn new(task_id: TaskId, resource_id: ResourceId, planned_hours: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_id,
            resource_id,
            planned_hours,
            actual_hours: None,
            weekly_distribution: Vec::new(),
            is_manual_distribution: false,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId);
        }
        for hours in std::iter::once(self.planned_hours).chain(self.actual_hours) {
            if !hours.is_finite() || hours < 0.0 {
                return Err(ValidationError::InvalidHours {
                    assignment_id: self.id,
                    hours,
                });
            }
        }
        Ok(())
    }
}
