//! Resource hours over calendar weeks.
//!
//! # Responsibility
//! - Spread an assignment's planned hours over the Monday-anchored weeks of
//!   its task, proportionally to the resource's available days per week.
//! - Report per-resource capacity and weekly load.
//!
//! # Invariants
//! - Hours are rounded to 2 decimals; the last week absorbs the rounding
//!   residual so the weekly sum reproduces the assignment total.
//! - Manual distributions are returned verbatim by recalculation.
//! - A resource is unavailable on non-working weekdays of its effective
//!   week, during vacations and on holidays that apply to it.

mod allocation;
mod availability;
mod capacity;

pub use allocation::{calculate_weekly_allocation, recalculate_weekly_allocation};
pub use availability::AvailabilityCalendar;
pub use capacity::{resource_capacity, resource_week_loads, LoadBand, WeekLoad};

/// Rounds to cents of an hour.
pub(crate) fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
