use chrono::NaiveDate;
use plansmith_core::calendar::combined_holidays;
use plansmith_core::model::DateRange;
use plansmith_core::resource::{
    calculate_weekly_allocation, resource_capacity, resource_week_loads, AvailabilityCalendar,
    LoadBand,
};
use plansmith_core::{Holiday, ProjectConfig, Resource, ResourceAssignment, WorkingWeek};
use uuid::Uuid;

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

fn total(hours: &[f64]) -> f64 {
    hours.iter().sum()
}

#[test]
fn one_full_week_gets_all_hours() {
    let week = WorkingWeek::default();
    let resource = Resource::new("dev", 40.0);
    let calendar = AvailabilityCalendar::new(&week, &[]);
    let scoped = calendar.with_resource(&resource);

    let weeks = calculate_weekly_allocation(&DateRange::new(date(6, 3), date(6, 7)), 40.0, &scoped);
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].week_start, date(6, 3));
    assert_eq!(weeks[0].working_days_in_week, 5);
    assert_eq!(weeks[0].planned_hours, 40.0);
}

#[test]
fn distribution_sums_to_planned_hours() {
    let week = WorkingWeek::default();
    let calendar = AvailabilityCalendar::new(&week, &[]);
    let spans = [
        DateRange::new(date(6, 5), date(6, 11)),
        DateRange::new(date(6, 3), date(6, 28)),
        DateRange::new(date(6, 6), date(7, 16)),
        DateRange::new(date(6, 7), date(6, 10)),
    ];

    for span in &spans {
        for planned in [1.0, 7.5, 33.0, 100.0, 173.37] {
            let weeks = calculate_weekly_allocation(span, planned, &calendar);
            let hours: Vec<f64> = weeks.iter().map(|week| week.planned_hours).collect();
            assert!((total(&hours) - planned).abs() <= 0.01, "{span:?} {planned}");
        }
    }
}

#[test]
fn holidays_and_vacations_shift_hours() {
    let week = WorkingWeek::default();
    let global = vec![
        Holiday::new("bank holiday", date(6, 10)),
        Holiday::new("regional", date(6, 11)).restricted_to(["berlin"]),
    ];
    let config = ProjectConfig::default();
    let holidays = combined_holidays(&global, &config);
    let calendar = AvailabilityCalendar::new(&week, &holidays);

    let span = DateRange::new(date(6, 3), date(6, 14));
    let berlin = Resource::new("berlin dev", 40.0)
        .with_tags(["berlin"])
        .with_vacation(DateRange::new(date(6, 3), date(6, 4)));

    // Week 1: 5 - 2 vacation days = 3. Week 2: 5 - 2 holidays = 3.
    let weeks = calculate_weekly_allocation(&span, 60.0, &calendar.with_resource(&berlin));
    assert_eq!(weeks[0].working_days_in_week, 3);
    assert_eq!(weeks[1].working_days_in_week, 3);
    assert_eq!(weeks[0].planned_hours, 30.0);
    assert_eq!(weeks[1].planned_hours, 30.0);

    // Without tags only the bank holiday applies: 5 and 4 days.
    let remote = Resource::new("remote dev", 40.0);
    let weeks = calculate_weekly_allocation(&span, 90.0, &calendar.with_resource(&remote));
    assert_eq!(weeks[0].planned_hours, 50.0);
    assert_eq!(weeks[1].planned_hours, 40.0);
}

#[test]
fn disabled_global_holidays_are_ignored() {
    let week = WorkingWeek::default();
    let global = vec![Holiday::new("bank holiday", date(6, 4))];
    let config = ProjectConfig {
        use_global_holidays: false,
        project_specific_holidays: vec![Holiday::new("offsite", date(6, 5))],
        ..ProjectConfig::default()
    };
    let holidays = combined_holidays(&global, &config);
    let calendar = AvailabilityCalendar::new(&week, &holidays);

    assert!(calendar.is_available(date(6, 4)));
    assert!(!calendar.is_available(date(6, 5)));
    assert_eq!(calendar.available_days(&DateRange::new(date(6, 3), date(6, 9))), 4);
}

#[test]
fn capacity_uses_custom_working_days() {
    let week = WorkingWeek::default();
    let calendar = AvailabilityCalendar::new(&week, &[]);
    let mut part_time = Resource::new("part time", 24.0);
    part_time.calendar.custom_working_days = Some(WorkingWeek::from_days(&[1, 2, 3]));

    let capacity = resource_capacity(&part_time, &DateRange::new(date(6, 3), date(6, 16)), &calendar);
    assert_eq!(capacity, 48.0);
}

#[test]
fn week_loads_band_utilization() {
    let week = WorkingWeek::default();
    let calendar = AvailabilityCalendar::new(&week, &[]);
    let dev = Resource::new("dev", 40.0);
    let idle = Resource::new("idle", 40.0);

    let mut first = ResourceAssignment::new(Uuid::new_v4(), dev.id, 30.0);
    first.weekly_distribution =
        calculate_weekly_allocation(&DateRange::new(date(6, 3), date(6, 7)), 30.0, &calendar);
    let mut second = ResourceAssignment::new(Uuid::new_v4(), dev.id, 24.0);
    second.weekly_distribution =
        calculate_weekly_allocation(&DateRange::new(date(6, 5), date(6, 11)), 24.0, &calendar);

    let loads = resource_week_loads(&[dev.clone(), idle.clone()], &[first, second], date(6, 5), 2);
    assert_eq!(loads.len(), 4);

    let dev_week_one = &loads[0];
    assert_eq!(dev_week_one.resource_id, dev.id);
    assert_eq!(dev_week_one.week_start, date(6, 3));
    assert_eq!(dev_week_one.week_key, "2024-W23");
    // 30 + 24 * 3/5.
    assert_eq!(dev_week_one.allocated_hours, 44.4);
    assert_eq!(dev_week_one.utilization_percent, 111);
    assert_eq!(dev_week_one.band, LoadBand::Over);

    let dev_week_two = &loads[1];
    assert_eq!(dev_week_two.allocated_hours, 9.6);
    assert_eq!(dev_week_two.band, LoadBand::Low);

    assert!(loads[2..].iter().all(|load| load.band == LoadBand::Idle));
}
