//! Actual-date track.

use super::propagation::{end_for, latest_constrained_start};
use super::rollup::{rollup_in_place, Track};
use super::ScheduleResult;
use crate::calendar::WorkingWeek;
use crate::graph::DependencyGraph;
use crate::model::{Dependency, Task, TaskId};
use std::collections::HashMap;

/// Derives `actual_start_date`/`actual_end_date` for every task in one
/// topological sweep, then rolls actual dates up into containers.
///
/// Tasks without predecessors keep an existing actual start (defaulting to
/// the planned start). Successors start after every predecessor's actual
/// end plus lag, falling back to its planned end. The end uses `actual_duration`
/// when tracked, else the planned duration; a root task without tracking
/// simply mirrors its planned end.
///
/// # Errors
/// - `ScheduleError::CyclicDependency` when `dependencies` contain a cycle.
pub fn calculate_actual_dates(
    tasks: &[Task],
    dependencies: &[Dependency],
    week: &WorkingWeek,
) -> ScheduleResult<Vec<Task>> {
    if tasks.is_empty() {
        return Ok(Vec::new());
    }

    let graph = DependencyGraph::build(tasks.iter().map(|task| task.id), dependencies);
    let order = graph.topological_order()?;

    let mut tracked = tasks.to_vec();
    let index: HashMap<TaskId, usize> = tracked
        .iter()
        .enumerate()
        .map(|(position, task)| (task.id, position))
        .collect();

    for task_id in &order {
        let Some(&position) = index.get(task_id) else {
            continue;
        };
        let predecessors = graph.predecessors(*task_id);

        if predecessors.is_empty() {
            let task = &mut tracked[position];
            let start = *task.actual_start_date.get_or_insert(task.start_date);
            task.actual_end_date = Some(match task.actual_duration {
                Some(duration) => end_for(start, duration, week),
                None => task.end_date,
            });
            continue;
        }

        let finishes = predecessors.iter().filter_map(|edge| {
            index.get(&edge.task_id).map(|other| {
                let predecessor = &tracked[*other];
                (
                    predecessor.actual_end_date.unwrap_or(predecessor.end_date),
                    edge.lag,
                )
            })
        });
        if let Some(start) = latest_constrained_start(finishes, week) {
            let task = &mut tracked[position];
            let duration = task.actual_duration.unwrap_or(task.duration);
            task.actual_start_date = Some(start);
            task.actual_end_date = Some(end_for(start, duration, week));
        }
    }

    rollup_in_place(&mut tracked, week, Track::Actual);
    Ok(tracked)
}
