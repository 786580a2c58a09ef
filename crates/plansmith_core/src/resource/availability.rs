//! Day-level availability of one resource.

use crate::calendar::WorkingWeek;
use crate::model::{DateRange, Holiday, Resource};
use chrono::NaiveDate;

/// Project working week and holidays, optionally narrowed to one resource.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityCalendar<'a> {
    working_week: &'a WorkingWeek,
    holidays: &'a [Holiday],
    resource: Option<&'a Resource>,
}

impl<'a> AvailabilityCalendar<'a> {
    /// Calendar with no resource: only unrestricted holidays apply.
    pub fn new(working_week: &'a WorkingWeek, holidays: &'a [Holiday]) -> Self {
        Self {
            working_week,
            holidays,
            resource: None,
        }
    }

    /// Same calendar narrowed to `resource`.
    pub fn with_resource<'b>(&self, resource: &'b Resource) -> AvailabilityCalendar<'b>
    where
        'a: 'b,
    {
        AvailabilityCalendar {
            working_week: self.working_week,
            holidays: self.holidays,
            resource: Some(resource),
        }
    }

    pub fn resource(&self) -> Option<&'a Resource> {
        self.resource
    }

    /// The resource's custom working days, else the project week.
    pub fn effective_week(&self) -> &'a WorkingWeek {
        self.resource
            .and_then(|resource| resource.calendar.custom_working_days.as_ref())
            .unwrap_or(self.working_week)
    }

    pub fn is_available(&self, date: NaiveDate) -> bool {
        if !self.effective_week().is_working_day(date) {
            return false;
        }
        if self
            .resource
            .is_some_and(|resource| resource.calendar.is_on_vacation(date))
        {
            return false;
        }
        !self
            .holidays
            .iter()
            .any(|holiday| holiday.date == date && holiday.applies_to_resource(self.resource))
    }

    /// Available days inside `range`; 0 for an empty range.
    pub fn available_days(&self, range: &DateRange) -> u32 {
        let count = range.days().filter(|day| self.is_available(*day)).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}
