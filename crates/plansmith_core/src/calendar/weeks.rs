//! Monday-anchored week helpers.

use chrono::{Datelike, Days, NaiveDate};

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Mondays of every week overlapping the inclusive range `[start, end]`.
pub fn weeks_overlapping(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut weeks = Vec::new();
    if end < start {
        return weeks;
    }

    let mut current = week_start(start);
    while current <= end {
        weeks.push(current);
        current = match current.checked_add_days(Days::new(7)) {
            Some(next) => next,
            None => break,
        };
    }
    weeks
}

/// ISO week key `YYYY-Www` of the week containing `date`.
pub fn week_key(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
