//! Weekly distribution of assignment hours.

use super::{round_hours, AvailabilityCalendar};
use crate::calendar::weeks_overlapping;
use crate::model::{DateRange, ResourceAssignment, WeeklyAllocation};
use chrono::{Days, NaiveDate};
use log::debug;

/// Splits `total_planned_hours` over the weeks overlapping `span`,
/// proportionally to the available days of `calendar` in each week.
///
/// The rounding residual lands on the last week with available days. When
/// no day in the span is available every week gets zero hours.
pub fn calculate_weekly_allocation(
    span: &DateRange,
    total_planned_hours: f64,
    calendar: &AvailabilityCalendar<'_>,
) -> Vec<WeeklyAllocation> {
    let weeks: Vec<(NaiveDate, u32)> = weeks_overlapping(span.start, span.end)
        .into_iter()
        .map(|monday| {
            let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
            let days = DateRange::new(monday, sunday)
                .intersection(span)
                .map_or(0, |overlap| calendar.available_days(&overlap));
            (monday, days)
        })
        .collect();

    let total_days: u32 = weeks.iter().map(|(_, days)| *days).sum();
    if total_days == 0 {
        debug!(
            "event=weekly_allocation module=resource status=skipped reason=no_available_days weeks={}",
            weeks.len()
        );
        return weeks
            .into_iter()
            .map(|(week_start, _)| WeeklyAllocation {
                week_start,
                working_days_in_week: 0,
                planned_hours: 0.0,
                actual_hours: None,
            })
            .collect();
    }

    let mut allocations: Vec<WeeklyAllocation> = weeks
        .into_iter()
        .map(|(week_start, days)| WeeklyAllocation {
            week_start,
            working_days_in_week: days,
            planned_hours: round_hours(
                total_planned_hours * f64::from(days) / f64::from(total_days),
            ),
            actual_hours: None,
        })
        .collect();

    let allocated: f64 = allocations.iter().map(|week| week.planned_hours).sum();
    let residual = round_hours(total_planned_hours - allocated);
    if residual != 0.0 {
        let last_available = allocations
            .iter_mut()
            .rev()
            .find(|week| week.working_days_in_week > 0);
        if let Some(last) = last_available {
            last.planned_hours = round_hours(last.planned_hours + residual);
        }
    }
    allocations
}

/// Distribution of `assignment` for its task's current `span`.
///
/// Manual distributions come back unchanged; everything else is computed
/// from scratch.
pub fn recalculate_weekly_allocation(
    assignment: &ResourceAssignment,
    span: &DateRange,
    calendar: &AvailabilityCalendar<'_>,
) -> Vec<WeeklyAllocation> {
    if assignment.is_manual_distribution {
        return assignment.weekly_distribution.clone();
    }
    calculate_weekly_allocation(span, assignment.planned_hours, calendar)
}
