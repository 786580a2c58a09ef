//! Dependency-driven date propagation.
//!
//! # Responsibility
//! - Move leaf tasks so no successor starts before its predecessors (plus
//!   lag) finish, on working days, keeping each leaf's duration.
//! - Re-run container rollup after every pass until nothing moves.
//!
//! # Invariants
//! - Tasks are visited in one topological order for the whole call.
//! - Containers are only ever written by rollup.
//! - A cycle fails the call before any date is touched.
//! - Input already at a fixed point converges in one pass with no changes.
//!
//! # See also
//! - docs: DESIGN.md "Schedule engine"

use super::hierarchy::container_ids;
use super::rollup::{rollup_in_place, Track};
use super::ScheduleResult;
use crate::calendar::{add_business_days, is_working_day, next_working_day, WorkingWeek};
use crate::graph::{DependencyGraph, Edge};
use crate::model::{Dependency, Task, TaskId};
use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pass cap used when callers do not configure one.
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Tuning for the fixed-point loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationOptions {
    pub max_passes: usize,
}

impl Default for PropagationOptions {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl PropagationOptions {
    /// Options with a custom pass cap; at least one pass always runs.
    pub fn with_max_passes(max_passes: usize) -> Self {
        Self {
            max_passes: max_passes.max(1),
        }
    }
}

/// Result of one propagation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationOutcome {
    /// Full replacement task list, in input order.
    pub tasks: Vec<Task>,
    /// Passes actually run.
    pub passes: usize,
    /// `false` when the pass cap was hit while leaves were still moving.
    pub converged: bool,
}

/// One task whose planned span or duration differs between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleChange {
    pub task_id: TaskId,
    pub previous_start: NaiveDate,
    pub previous_end: NaiveDate,
    pub previous_duration: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: u32,
}

/// Recalculates planned dates with the default pass cap.
///
/// # Errors
/// - `ScheduleError::CyclicDependency` when `dependencies` contain a cycle.
pub fn recalculate_task_dates(
    tasks: &[Task],
    dependencies: &[Dependency],
    week: &WorkingWeek,
) -> ScheduleResult<PropagationOutcome> {
    recalculate_task_dates_with(tasks, dependencies, week, PropagationOptions::default())
}

/// Recalculates planned dates for every leaf task, then rolls containers up,
/// repeating until a pass changes no leaf or `options.max_passes` is hit.
///
/// Dependencies naming unknown tasks are skipped. Hitting the pass cap is
/// logged and reported through `PropagationOutcome::converged`.
///
/// # Errors
/// - `ScheduleError::CyclicDependency` when `dependencies` contain a cycle.
pub fn recalculate_task_dates_with(
    tasks: &[Task],
    dependencies: &[Dependency],
    week: &WorkingWeek,
    options: PropagationOptions,
) -> ScheduleResult<PropagationOutcome> {
    if tasks.is_empty() {
        return Ok(PropagationOutcome {
            tasks: Vec::new(),
            passes: 0,
            converged: true,
        });
    }

    let graph = DependencyGraph::build(tasks.iter().map(|task| task.id), dependencies);
    let order = graph.topological_order()?;

    let mut scheduled = tasks.to_vec();
    let index: HashMap<TaskId, usize> = scheduled
        .iter()
        .enumerate()
        .map(|(position, task)| (task.id, position))
        .collect();
    let containers = container_ids(&scheduled);
    let max_passes = options.max_passes.max(1);

    let mut passes = 0;
    let mut converged = false;
    while passes < max_passes {
        passes += 1;
        let mut moved = 0usize;

        for task_id in &order {
            if containers.contains(task_id) {
                continue;
            }
            let Some(&position) = index.get(task_id) else {
                continue;
            };
            let predecessors = graph.predecessors(*task_id);
            let target = if predecessors.is_empty() {
                snapped_span(&scheduled[position], week)
            } else {
                constrained_span(&scheduled, &index, predecessors, &scheduled[position], week)
            };

            if let Some((start, end)) = target {
                let task = &mut scheduled[position];
                if task.start_date != start || task.end_date != end {
                    task.start_date = start;
                    task.end_date = end;
                    moved += 1;
                }
            }
        }

        rollup_in_place(&mut scheduled, week, Track::Planned);
        debug!(
            "event=propagation_pass module=schedule status=ok pass={} moved={}",
            passes, moved
        );

        if moved == 0 {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            "event=propagation_pass_limit module=schedule status=recovered passes={} tasks={}",
            passes,
            scheduled.len()
        );
    }

    Ok(PropagationOutcome {
        tasks: scheduled,
        passes,
        converged,
    })
}

/// Lists tasks of `after` whose planned span or duration differs from the
/// same task in `before`. Tasks absent from `before` are ignored.
pub fn schedule_changes(before: &[Task], after: &[Task]) -> Vec<ScheduleChange> {
    let previous: HashMap<TaskId, &Task> = before.iter().map(|task| (task.id, task)).collect();
    after
        .iter()
        .filter_map(|task| {
            let old = previous.get(&task.id)?;
            let unchanged = old.start_date == task.start_date
                && old.end_date == task.end_date
                && old.duration == task.duration;
            if unchanged {
                return None;
            }
            Some(ScheduleChange {
                task_id: task.id,
                previous_start: old.start_date,
                previous_end: old.end_date,
                previous_duration: old.duration,
                start_date: task.start_date,
                end_date: task.end_date,
                duration: task.duration,
            })
        })
        .collect()
}

/// Span for a leaf without predecessors: only moved when it starts on a
/// non-working day.
fn snapped_span(task: &Task, week: &WorkingWeek) -> Option<(NaiveDate, NaiveDate)> {
    if is_working_day(task.start_date, week) {
        return None;
    }
    let start = next_working_day(task.start_date, week);
    Some((start, end_for(start, task.duration, week)))
}

/// Span for a leaf constrained by finish-to-start predecessors.
fn constrained_span(
    tasks: &[Task],
    index: &HashMap<TaskId, usize>,
    predecessors: &[Edge],
    task: &Task,
    week: &WorkingWeek,
) -> Option<(NaiveDate, NaiveDate)> {
    let finishes = predecessors.iter().filter_map(|edge| {
        index
            .get(&edge.task_id)
            .map(|position| (tasks[*position].end_date, edge.lag))
    });
    let start = latest_constrained_start(finishes, week)?;
    Some((start, end_for(start, task.duration, week)))
}

/// Latest start demanded by any `(end, lag)` predecessor finish.
///
/// Every edge yields its own candidate, so a short predecessor with a long
/// lag can outweigh a long predecessor without one. `None` for no finishes.
pub(crate) fn latest_constrained_start<I>(
    finishes: I,
    week: &WorkingWeek,
) -> Option<NaiveDate>
where
    I: IntoIterator<Item = (NaiveDate, u32)>,
{
    finishes
        .into_iter()
        .map(|(end, lag)| earliest_start_after(end, lag, week))
        .max()
}

/// First working day after `end`, shifted by `lag` further working days.
fn earliest_start_after(end: NaiveDate, lag: u32, week: &WorkingWeek) -> NaiveDate {
    let day_after = end.succ_opt().unwrap_or(end);
    let start = next_working_day(day_after, week);
    add_business_days(start, lag, week)
}

pub(crate) fn end_for(start: NaiveDate, duration: u32, week: &WorkingWeek) -> NaiveDate {
    add_business_days(start, duration.saturating_sub(1), week)
}

#[cfg(test)]
mod tests {
    use super::{
        latest_constrained_start, recalculate_task_dates, recalculate_task_dates_with,
        schedule_changes, PropagationOptions,
    };
    use crate::calendar::WorkingWeek;
    use crate::model::{Dependency, Task};
    use crate::schedule::ScheduleError;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).expect("valid date")
    }

    fn task(name: &str, start: u32, duration: u32) -> Task {
        Task::new(name, date(start), duration, &WorkingWeek::default())
    }

    #[test]
    fn empty_input_converges_immediately() {
        let outcome =
            recalculate_task_dates(&[], &[], &WorkingWeek::default()).expect("empty schedule");
        assert!(outcome.tasks.is_empty());
        assert!(outcome.converged);
        assert_eq!(outcome.passes, 0);
    }

    #[test]
    fn successor_moves_after_predecessor() {
        let a = task("a", 3, 5);
        let b = task("b", 3, 2);
        let deps = vec![Dependency::new(a.id, b.id)];

        let outcome = recalculate_task_dates(&[a, b], &deps, &WorkingWeek::default())
            .expect("acyclic schedule");
        let b = &outcome.tasks[1];
        assert_eq!(b.start_date, date(10));
        assert_eq!(b.end_date, date(11));
        assert!(outcome.converged);
    }

    #[test]
    fn weekend_start_without_predecessors_is_snapped() {
        let mut a = task("a", 3, 3);
        a.start_date = date(8);
        a.end_date = date(8);

        let outcome =
            recalculate_task_dates(&[a], &[], &WorkingWeek::default()).expect("schedule");
        assert_eq!(outcome.tasks[0].start_date, date(10));
        assert_eq!(outcome.tasks[0].end_date, date(12));
    }

    #[test]
    fn each_predecessor_lag_counts_on_its_own() {
        let week = WorkingWeek::default();
        // Equal ends: the larger lag wins. Wed 5 + 1 day + 3 lag = Tue 11.
        assert_eq!(
            latest_constrained_start([(date(5), 1), (date(5), 3)], &week),
            Some(date(11))
        );
        // Mon 3 + lag 9 beats Wed 5 + lag 1.
        assert_eq!(
            latest_constrained_start([(date(5), 1), (date(3), 9)], &week),
            Some(date(17))
        );
        assert_eq!(
            latest_constrained_start(Vec::<(NaiveDate, u32)>::new(), &week),
            None
        );
    }

    #[test]
    fn early_predecessor_with_long_lag_still_binds() {
        let week = WorkingWeek::default();
        let short = task("short", 3, 1);
        let long = task("long", 3, 4);
        let sink = task("sink", 3, 1);
        let deps = vec![
            Dependency::new(short.id, sink.id).with_lag(5),
            Dependency::new(long.id, sink.id),
        ];

        let outcome =
            recalculate_task_dates(&[short, long, sink], &deps, &week).expect("acyclic schedule");
        // short ends Mon 3: Tue 4 + 5 working days = Tue 11, after long's Fri 7.
        assert_eq!(outcome.tasks[2].start_date, date(11));
        assert_eq!(outcome.tasks[2].end_date, date(11));
    }

    #[test]
    fn cycle_is_fatal() {
        let a = task("a", 3, 1);
        let b = task("b", 3, 1);
        let deps = vec![Dependency::new(a.id, b.id), Dependency::new(b.id, a.id)];

        let err = recalculate_task_dates(&[a, b], &deps, &WorkingWeek::default())
            .expect_err("cycle must fail");
        assert!(matches!(err, ScheduleError::CyclicDependency { .. }));
    }

    #[test]
    fn pass_cap_is_at_least_one() {
        assert_eq!(PropagationOptions::with_max_passes(0).max_passes, 1);
        let a = task("a", 3, 1);
        let b = task("b", 3, 1);
        let deps = vec![Dependency::new(a.id, b.id)];
        let outcome = recalculate_task_dates_with(
            &[a, b],
            &deps,
            &WorkingWeek::default(),
            PropagationOptions::with_max_passes(1),
        )
        .expect("acyclic schedule");
        assert_eq!(outcome.passes, 1);
        assert!(!outcome.converged);
        assert_eq!(outcome.tasks[1].start_date, date(4));
    }

    #[test]
    fn changes_list_only_moved_tasks() {
        let a = task("a", 3, 5);
        let b = task("b", 3, 2);
        let deps = vec![Dependency::new(a.id, b.id)];
        let before = vec![a, b.clone()];

        let outcome =
            recalculate_task_dates(&before, &deps, &WorkingWeek::default()).expect("schedule");
        let changes = schedule_changes(&before, &outcome.tasks);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].task_id, b.id);
        assert_eq!(changes[0].previous_start, date(3));
        assert_eq!(changes[0].start_date, date(10));
    }
}
