//! Working-day calendar primitives.
//!
//! # Responsibility
//! - Decide whether a calendar day is a working day.
//! - Count and advance working days over `NaiveDate` values.
//! - Enumerate Monday-anchored weeks and combine holiday lists.
//!
//! # Invariants
//! - All functions work at calendar-day granularity and never mutate inputs.
//! - A `WorkingWeek` always contains at least one day, so working-day scans
//!   terminate.

mod business_days;
mod holidays;
mod weeks;
mod working_week;

pub use business_days::{add_business_days, count_business_days, is_working_day, next_working_day};
pub use holidays::combined_holidays;
pub use weeks::{week_key, week_start, weeks_overlapping};
pub use working_week::WorkingWeek;
