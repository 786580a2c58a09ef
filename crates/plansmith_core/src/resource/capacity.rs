//! Resource capacity and weekly utilization.

use super::{round_hours, AvailabilityCalendar};
use crate::calendar::{week_key, week_start};
use crate::model::{DateRange, Resource, ResourceAssignment, ResourceId};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Utilization bucket of one resource-week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadBand {
    /// Nothing allocated.
    Idle,
    /// Up to 50%.
    Low,
    /// Up to 75%.
    Medium,
    /// Up to 100%.
    High,
    /// Over capacity.
    Over,
}

impl LoadBand {
    pub fn from_utilization(percent: u32) -> Self {
        match percent {
            0 => Self::Idle,
            1..=50 => Self::Low,
            51..=75 => Self::Medium,
            76..=100 => Self::High,
            _ => Self::Over,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Over => "over",
        }
    }
}

/// Allocated vs. available hours of one resource in one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekLoad {
    pub resource_id: ResourceId,
    pub week_start: NaiveDate,
    /// ISO key `YYYY-Www`.
    pub week_key: String,
    pub allocated_hours: f64,
    pub capacity_hours: f64,
    pub utilization_percent: u32,
    pub band: LoadBand,
}

/// Hours `resource` can work inside `range`.
///
/// Each available day is worth `max_hours_per_week` divided by the number
/// of days in the resource's effective working week.
pub fn resource_capacity(
    resource: &Resource,
    range: &DateRange,
    calendar: &AvailabilityCalendar<'_>,
) -> f64 {
    let scoped = calendar.with_resource(resource);
    let days_per_week = scoped.effective_week().len().max(1);
    let hours_per_day = resource.max_hours_per_week / f64::from(days_per_week);
    round_hours(hours_per_day * f64::from(scoped.available_days(range)))
}

/// Load of every resource over `week_count` weeks starting with the week
/// containing `from`, resources outer and weeks inner.
///
/// Allocations are matched to weeks by ISO week key.
pub fn resource_week_loads(
    resources: &[Resource],
    assignments: &[ResourceAssignment],
    from: NaiveDate,
    week_count: usize,
) -> Vec<WeekLoad> {
    let first = week_start(from);
    let weeks: Vec<(NaiveDate, String)> = (0..week_count)
        .map_while(|offset| {
            let days = u64::try_from(offset).ok()?.checked_mul(7)?;
            first.checked_add_days(Days::new(days))
        })
        .map(|monday| (monday, week_key(monday)))
        .collect();

    let mut allocated: HashMap<(ResourceId, String), f64> = HashMap::new();
    for assignment in assignments {
        for week in &assignment.weekly_distribution {
            *allocated
                .entry((assignment.resource_id, week_key(week.week_start)))
                .or_default() += week.planned_hours;
        }
    }

    let (weeks, allocated) = (&weeks, &allocated);
    resources
        .iter()
        .flat_map(move |resource| {
            weeks.iter().map(move |(monday, key)| {
                let hours = allocated
                    .get(&(resource.id, key.clone()))
                    .copied()
                    .unwrap_or(0.0);
                let capacity = resource.max_hours_per_week;
                let utilization_percent = if capacity > 0.0 {
                    (hours / capacity * 100.0).round().max(0.0) as u32
                } else {
                    0
                };
                WeekLoad {
                    resource_id: resource.id,
                    week_start: *monday,
                    week_key: key.clone(),
                    allocated_hours: round_hours(hours),
                    capacity_hours: capacity,
                    utilization_percent,
                    band: LoadBand::from_utilization(utilization_percent),
                }
            })
        })
        .collect()
}
