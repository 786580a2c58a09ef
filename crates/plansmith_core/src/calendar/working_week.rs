//! Set of working days of the week.

use chrono::{Datelike, NaiveDate, Weekday};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Sunday=0 .. Saturday=6, bit `n` set when day `n` is a working day.
const MONDAY_TO_FRIDAY: u8 = 0b0011_1110;
const ALL_DAYS: u8 = 0b0111_1111;

/// Working days of the week, numbered 0 (Sunday) to 6 (Saturday).
///
/// Never empty: construction from untrusted input drops out-of-range values
/// and falls back to Monday–Friday when nothing valid remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<i64>", into = "Vec<u8>")]
pub struct WorkingWeek {
    mask: u8,
}

impl Default for WorkingWeek {
    fn default() -> Self {
        Self {
            mask: MONDAY_TO_FRIDAY,
        }
    }
}

impl WorkingWeek {
    /// Monday to Friday.
    pub fn monday_to_friday() -> Self {
        Self::default()
    }

    /// Every day of the week.
    pub fn every_day() -> Self {
        Self { mask: ALL_DAYS }
    }

    /// Parses day numbers, returning `None` when no value is in `0..=6`.
    pub fn parse_days(days: &[i64]) -> Option<Self> {
        let mask = days
            .iter()
            .filter_map(|day| u8::try_from(*day).ok())
            .filter(|day| *day <= 6)
            .fold(0u8, |mask, day| mask | (1 << day));
        (mask != 0).then_some(Self { mask })
    }

    /// Parses day numbers, substituting Monday–Friday for an empty or fully
    /// invalid set.
    pub fn from_days(days: &[i64]) -> Self {
        match Self::parse_days(days) {
            Some(week) => week,
            None => {
                warn!(
                    "event=working_week_fallback module=calendar status=recovered input={:?} fallback=1,2,3,4,5",
                    days
                );
                Self::default()
            }
        }
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.mask & (1 << weekday.num_days_from_sunday()) != 0
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }

    /// Number of working days per week.
    pub fn len(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Day numbers in ascending order.
    pub fn days(&self) -> Vec<u8> {
        (0u8..7).filter(|day| self.mask & (1 << day) != 0).collect()
    }
}

impl From<Vec<i64>> for WorkingWeek {
    fn from(value: Vec<i64>) -> Self {
        Self::from_days(&value)
    }
}

impl From<WorkingWeek> for Vec<u8> {
    fn from(value: WorkingWeek) -> Self {
        value.days()
    }
}

impl Display for WorkingWeek {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let days = self
            .days()
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{days}")
    }
}

#[cfg(test)]
mod tests {
    use super::WorkingWeek;
    use chrono::Weekday;

    #[test]
    fn default_is_monday_to_friday() {
        let week = WorkingWeek::default();
        assert_eq!(week.days(), vec![1, 2, 3, 4, 5]);
        assert!(!week.contains(Weekday::Sat));
        assert!(!week.contains(Weekday::Sun));
        assert_eq!(week.len(), 5);
    }

    #[test]
    fn parse_drops_out_of_range_values() {
        let week = WorkingWeek::parse_days(&[0, 6, 7, -1, 42]).expect("weekend days are valid");
        assert_eq!(week.days(), vec![0, 6]);
    }

    #[test]
    fn empty_or_invalid_input_falls_back_to_weekdays() {
        assert_eq!(WorkingWeek::parse_days(&[]), None);
        assert_eq!(WorkingWeek::from_days(&[]), WorkingWeek::monday_to_friday());
        assert_eq!(
            WorkingWeek::from_days(&[9, -3]),
            WorkingWeek::monday_to_friday()
        );
    }

    #[test]
    fn serializes_as_day_list() {
        let week = WorkingWeek::parse_days(&[1, 2, 3]).expect("valid days");
        let json = serde_json::to_value(week).expect("serialize week");
        assert_eq!(json, serde_json::json!([1, 2, 3]));

        let decoded: WorkingWeek = serde_json::from_value(serde_json::json!([8])).expect("decode");
        assert_eq!(decoded, WorkingWeek::monday_to_friday());
    }

    #[test]
    fn display_lists_day_numbers() {
        assert_eq!(WorkingWeek::every_day().to_string(), "0,1,2,3,4,5,6");
    }
}
