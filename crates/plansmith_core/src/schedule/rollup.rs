//! Container date rollup.
//!
//! # Invariants
//! - Containers are processed deepest `level` first, so a container always
//!   reads already-rolled-up values from nested containers.
//! - A container's span is exactly the min/max envelope of its direct
//!   children and its duration is the working-day count of that span.
//! - Leaf tasks are never written.

use super::hierarchy::children_by_parent;
use crate::calendar::{count_business_days, WorkingWeek};
use crate::model::Task;
use chrono::NaiveDate;

/// Which date track a rollup reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Track {
    Planned,
    /// Actual dates, falling back to planned dates for children without
    /// tracking data.
    Actual,
}

impl Track {
    fn span(self, task: &Task) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Planned => (task.start_date, task.end_date),
            Self::Actual => (
                task.actual_start_date.unwrap_or(task.start_date),
                task.actual_end_date.unwrap_or(task.end_date),
            ),
        }
    }

    fn write(self, task: &mut Task, start: NaiveDate, end: NaiveDate, duration: u32) {
        match self {
            Self::Planned => {
                task.start_date = start;
                task.end_date = end;
                task.duration = duration;
            }
            Self::Actual => {
                task.actual_start_date = Some(start);
                task.actual_end_date = Some(end);
                task.actual_duration = Some(duration);
            }
        }
    }
}

/// Returns a copy of `tasks` with every container's planned span rolled up
/// from its children.
pub fn rollup_parent_dates(tasks: &[Task], week: &WorkingWeek) -> Vec<Task> {
    let mut rolled = tasks.to_vec();
    rollup_in_place(&mut rolled, week, Track::Planned);
    rolled
}

/// Returns a copy of `tasks` with every container's actual span rolled up
/// from its children.
pub fn rollup_parent_actual_dates(tasks: &[Task], week: &WorkingWeek) -> Vec<Task> {
    let mut rolled = tasks.to_vec();
    rollup_in_place(&mut rolled, week, Track::Actual);
    rolled
}

pub(crate) fn rollup_in_place(tasks: &mut [Task], week: &WorkingWeek, track: Track) {
    let children = children_by_parent(tasks);
    if children.is_empty() {
        return;
    }

    let mut order: Vec<usize> = (0..tasks.len()).collect();
    order.sort_by(|a, b| tasks[*b].level.cmp(&tasks[*a].level));

    for index in order {
        let Some(child_indices) = children.get(&tasks[index].id) else {
            continue;
        };
        let envelope = child_indices
            .iter()
            .map(|child| track.span(&tasks[*child]))
            .reduce(|(start, end), (child_start, child_end)| {
                (start.min(child_start), end.max(child_end))
            });
        if let Some((start, end)) = envelope {
            let duration = count_business_days(start, end, week);
            track.write(&mut tasks[index], start, end, duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{rollup_parent_actual_dates, rollup_parent_dates};
    use crate::calendar::WorkingWeek;
    use crate::model::Task;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).expect("valid date")
    }

    fn task(name: &str, start: u32, duration: u32) -> Task {
        Task::new(name, date(start), duration, &WorkingWeek::default())
    }

    #[test]
    fn container_spans_its_children() {
        let week = WorkingWeek::default();
        let root = task("root", 3, 1);
        let first = task("first", 4, 2).under(&root);
        let second = task("second", 10, 3).under(&root);
        let tasks = vec![root.clone(), first, second];

        let rolled = rollup_parent_dates(&tasks, &week);
        let root = &rolled[0];
        assert_eq!(root.start_date, date(4));
        assert_eq!(root.end_date, date(12));
        // Tue 4th .. Wed 12th spans one weekend.
        assert_eq!(root.duration, 7);
        assert_eq!(rolled[1..], tasks[1..]);
    }

    #[test]
    fn nested_containers_roll_up_bottom_up() {
        let week = WorkingWeek::default();
        let root = task("root", 3, 1);
        let phase = task("phase", 3, 1).under(&root);
        let leaf = task("leaf", 17, 5).under(&phase);
        // Root listed before the phase it depends on.
        let tasks = vec![root, phase, leaf];

        let rolled = rollup_parent_dates(&tasks, &week);
        assert_eq!(rolled[1].start_date, date(17));
        assert_eq!(rolled[0].start_date, date(17));
        assert_eq!(rolled[0].end_date, date(21));
        assert_eq!(rolled[0].duration, 5);
    }

    #[test]
    fn actual_rollup_falls_back_to_planned_dates() {
        let week = WorkingWeek::default();
        let root = task("root", 3, 1);
        let mut tracked = task("tracked", 3, 2).under(&root);
        tracked.actual_start_date = Some(date(5));
        tracked.actual_end_date = Some(date(7));
        tracked.actual_duration = Some(3);
        let untracked = task("untracked", 10, 1).under(&root);
        let tasks = vec![root, tracked, untracked];

        let rolled = rollup_parent_actual_dates(&tasks, &week);
        assert_eq!(rolled[0].actual_start_date, Some(date(5)));
        assert_eq!(rolled[0].actual_end_date, Some(date(10)));
        assert_eq!(rolled[0].actual_duration, Some(4));
        // Planned track is untouched.
        assert_eq!(rolled[0].start_date, date(3));
        assert_eq!(rolled[2].actual_start_date, None);
    }
}
