//! Working-day arithmetic.

use super::WorkingWeek;
use chrono::NaiveDate;
use log::error;

const MIN_SCAN_LIMIT: u64 = 1000;
const NEXT_WORKING_DAY_SCAN: u32 = 14;

/// Whether `date` falls on one of the working days of `week`.
pub fn is_working_day(date: NaiveDate, week: &WorkingWeek) -> bool {
    week.is_working_day(date)
}

/// Inclusive count of working days in `[start, end]`; zero when reversed.
pub fn count_business_days(start: NaiveDate, end: NaiveDate, week: &WorkingWeek) -> u32 {
    if end < start {
        return 0;
    }
    let count = start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| week.is_working_day(*day))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Advances `days` working days from `date`; `0` returns `date` unchanged.
///
/// The start day itself is not counted, so the result of `n > 0` is always a
/// working day. Iteration is capped at `max(3n, 1000)` calendar days.
pub fn add_business_days(date: NaiveDate, days: u32, week: &WorkingWeek) -> NaiveDate {
    if days == 0 {
        return date;
    }

    let limit = (u64::from(days) * 3).max(MIN_SCAN_LIMIT);
    let mut current = date;
    let mut remaining = days;
    let mut steps = 0u64;

    while remaining > 0 && steps < limit {
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
        steps += 1;
        if week.is_working_day(current) {
            remaining -= 1;
        }
    }

    if remaining > 0 {
        error!(
            "event=business_day_scan module=calendar status=error start={} days={} remaining={} steps={}",
            date, days, remaining, steps
        );
    }
    current
}

/// First working day on or after `date`.
pub fn next_working_day(date: NaiveDate, week: &WorkingWeek) -> NaiveDate {
    let mut current = date;
    for _ in 0..NEXT_WORKING_DAY_SCAN {
        if week.is_working_day(current) {
            return current;
        }
        current = match current.succ_opt() {
            Some(next) => next,
            None => return current,
        };
    }
    current
}

#[cfg(test)]
mod tests {
    use super::{add_business_days, count_business_days, is_working_day, next_working_day};
    use crate::calendar::WorkingWeek;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn weekend_is_not_working_by_default() {
        let week = WorkingWeek::default();
        // 2024-06-01 is a Saturday.
        assert!(!is_working_day(date(2024, 6, 1), &week));
        assert!(is_working_day(date(2024, 6, 3), &week));
    }

    #[test]
    fn add_zero_returns_same_date() {
        let week = WorkingWeek::default();
        assert_eq!(add_business_days(date(2024, 6, 1), 0, &week), date(2024, 6, 1));
    }

    #[test]
    fn add_skips_weekends() {
        let week = WorkingWeek::default();
        // Friday + 1 working day = Monday.
        assert_eq!(add_business_days(date(2024, 6, 7), 1, &week), date(2024, 6, 10));
        // Monday + 4 = Friday of the same week.
        assert_eq!(add_business_days(date(2024, 6, 3), 4, &week), date(2024, 6, 7));
        // Monday + 10 = Monday two weeks later.
        assert_eq!(add_business_days(date(2024, 6, 3), 10, &week), date(2024, 6, 17));
    }

    #[test]
    fn add_honors_custom_week() {
        let week = WorkingWeek::parse_days(&[6]).expect("saturday only");
        assert_eq!(add_business_days(date(2024, 6, 3), 2, &week), date(2024, 6, 15));
    }

    #[test]
    fn count_is_inclusive_and_zero_when_reversed() {
        let week = WorkingWeek::default();
        assert_eq!(count_business_days(date(2024, 6, 3), date(2024, 6, 7), &week), 5);
        assert_eq!(count_business_days(date(2024, 6, 3), date(2024, 6, 16), &week), 10);
        assert_eq!(count_business_days(date(2024, 6, 8), date(2024, 6, 9), &week), 0);
        assert_eq!(count_business_days(date(2024, 6, 7), date(2024, 6, 3), &week), 0);
    }

    #[test]
    fn count_matches_add_for_durations() {
        let week = WorkingWeek::default();
        let start = date(2024, 6, 5);
        for duration in 1..30 {
            let end = add_business_days(start, duration - 1, &week);
            assert_eq!(count_business_days(start, end, &week), duration);
        }
    }

    #[test]
    fn next_working_day_snaps_forward_only_when_needed() {
        let week = WorkingWeek::default();
        assert_eq!(next_working_day(date(2024, 6, 8), &week), date(2024, 6, 10));
        assert_eq!(next_working_day(date(2024, 6, 4), &week), date(2024, 6, 4));
    }
}
