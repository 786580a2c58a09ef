//! Critical path method.
//!
//! # Responsibility
//! - Forward/backward pass over the dependency graph in day offsets.
//! - Flag zero-float leaves as critical and order them into a path.
//!
//! # Invariants
//! - Offsets are whole days relative to the earliest project start (0), so
//!   float comparisons are exact.
//! - Containers take part in both passes but are never critical.
//! - Calendar dates on the input tasks are ignored; only `duration`, the
//!   hierarchy and the dependency lags matter.

use super::hierarchy::container_ids;
use super::ScheduleResult;
use crate::graph::DependencyGraph;
use crate::model::{Dependency, Task, TaskId};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// A task annotated with its CPM figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskWithCpm {
    #[serde(flatten)]
    pub task: Task,
    pub early_start: i64,
    pub early_finish: i64,
    pub late_start: i64,
    pub late_finish: i64,
    pub total_float: i64,
    pub is_critical: bool,
}

/// Full CPM result for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalPathAnalysis {
    pub tasks: Vec<TaskWithCpm>,
    pub project_duration: i64,
    pub critical_sequence: Vec<TaskId>,
}

/// Runs the forward and backward passes and returns one entry per input
/// task, in input order.
///
/// # Errors
/// - `ScheduleError::CyclicDependency` when `dependencies` contain a cycle.
pub fn calculate_critical_path(
    tasks: &[Task],
    dependencies: &[Dependency],
) -> ScheduleResult<Vec<TaskWithCpm>> {
    if tasks.is_empty() {
        return Ok(Vec::new());
    }

    let graph = DependencyGraph::build(tasks.iter().map(|task| task.id), dependencies);
    let order = graph.topological_order()?;
    let index: HashMap<TaskId, usize> = tasks
        .iter()
        .enumerate()
        .map(|(position, task)| (task.id, position))
        .collect();
    let durations: Vec<i64> = tasks.iter().map(|task| i64::from(task.duration)).collect();

    let mut early_start = vec![0i64; tasks.len()];
    let mut early_finish = vec![0i64; tasks.len()];
    for task_id in &order {
        let Some(&position) = index.get(task_id) else {
            continue;
        };
        let start = graph
            .predecessors(*task_id)
            .iter()
            .filter_map(|edge| {
                index
                    .get(&edge.task_id)
                    .map(|other| early_finish[*other] + i64::from(edge.lag))
            })
            .max()
            .unwrap_or(0);
        early_start[position] = start;
        early_finish[position] = start + durations[position];
    }

    let completion = early_finish.iter().copied().max().unwrap_or(0);

    let mut late_start = vec![0i64; tasks.len()];
    let mut late_finish = vec![0i64; tasks.len()];
    for task_id in order.iter().rev() {
        let Some(&position) = index.get(task_id) else {
            continue;
        };
        let finish = graph
            .successors(*task_id)
            .iter()
            .filter_map(|edge| {
                index
                    .get(&edge.task_id)
                    .map(|other| late_start[*other] - i64::from(edge.lag))
            })
            .min()
            .unwrap_or(completion);
        late_finish[position] = finish;
        late_start[position] = finish - durations[position];
    }

    let containers = container_ids(tasks);
    let analysed: Vec<TaskWithCpm> = tasks
        .iter()
        .enumerate()
        .map(|(position, task)| {
            let total_float = late_start[position] - early_start[position];
            TaskWithCpm {
                task: task.clone(),
                early_start: early_start[position],
                early_finish: early_finish[position],
                late_start: late_start[position],
                late_finish: late_finish[position],
                total_float,
                is_critical: total_float == 0 && !containers.contains(&task.id),
            }
        })
        .collect();

    debug!(
        "event=critical_path module=schedule status=ok tasks={} critical={} duration={}",
        analysed.len(),
        analysed.iter().filter(|task| task.is_critical).count(),
        completion
    );
    Ok(analysed)
}

pub fn critical_tasks(analysed: &[TaskWithCpm]) -> Vec<&TaskWithCpm> {
    analysed.iter().filter(|task| task.is_critical).collect()
}

/// Critical task ids in dependency order; among tasks that are ready at
/// the same time the smaller `early_start` goes first, then input order.
pub fn critical_path_sequence(analysed: &[TaskWithCpm], dependencies: &[Dependency]) -> Vec<TaskId> {
    let critical: HashMap<TaskId, usize> = analysed
        .iter()
        .enumerate()
        .filter(|(_, task)| task.is_critical)
        .map(|(position, task)| (task.task.id, position))
        .collect();
    if critical.is_empty() {
        return Vec::new();
    }

    let mut successors: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut in_degree: HashMap<usize, usize> = critical.values().map(|p| (*p, 0)).collect();
    for dependency in dependencies {
        let (Some(&from), Some(&to)) = (
            critical.get(&dependency.predecessor_id),
            critical.get(&dependency.successor_id),
        ) else {
            continue;
        };
        successors.entry(from).or_default().push(to);
        *in_degree.entry(to).or_default() += 1;
    }

    let mut ready: BinaryHeap<Reverse<(i64, usize)>> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(position, _)| Reverse((analysed[*position].early_start, *position)))
        .collect();
    let mut sequence = Vec::with_capacity(critical.len());

    while let Some(Reverse((_, position))) = ready.pop() {
        sequence.push(analysed[position].task.id);
        for next in successors.get(&position).map(Vec::as_slice).unwrap_or(&[]) {
            if let Some(degree) = in_degree.get_mut(next) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push(Reverse((analysed[*next].early_start, *next)));
                }
            }
        }
    }
    sequence
}

/// Length of the longest chain in day offsets; 0 for an empty schedule.
pub fn project_duration(analysed: &[TaskWithCpm]) -> i64 {
    analysed
        .iter()
        .map(|task| task.early_finish)
        .max()
        .unwrap_or(0)
}

/// Convenience wrapper bundling the per-task figures, project duration and
/// the ordered critical path.
///
/// # Errors
/// - `ScheduleError::CyclicDependency` when `dependencies` contain a cycle.
pub fn analyze_critical_path(
    tasks: &[Task],
    dependencies: &[Dependency],
) -> ScheduleResult<CriticalPathAnalysis> {
    let analysed = calculate_critical_path(tasks, dependencies)?;
    let critical_sequence = critical_path_sequence(&analysed, dependencies);
    Ok(CriticalPathAnalysis {
        project_duration: project_duration(&analysed),
        critical_sequence,
        tasks: analysed,
    })
}

#[cfg(test)]
mod tests {
    use super::{analyze_critical_path, calculate_critical_path, critical_tasks};
    use crate::calendar::WorkingWeek;
    use crate::model::{Dependency, Task};
    use chrono::NaiveDate;

    fn task(name: &str, duration: u32) -> Task {
        let start = NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date");
        Task::new(name, start, duration, &WorkingWeek::default())
    }

    #[test]
    fn empty_schedule_has_zero_duration() {
        let analysis = analyze_critical_path(&[], &[]).expect("empty schedule");
        assert!(analysis.tasks.is_empty());
        assert_eq!(analysis.project_duration, 0);
        assert!(analysis.critical_sequence.is_empty());
    }

    #[test]
    fn lag_extends_the_chain() {
        let a = task("a", 2);
        let b = task("b", 3);
        let deps = vec![Dependency::new(a.id, b.id).with_lag(2)];

        let analysed = calculate_critical_path(&[a, b], &deps).expect("acyclic");
        assert_eq!(analysed[1].early_start, 4);
        assert_eq!(analysed[1].early_finish, 7);
        assert_eq!(analysed[0].late_finish, 2);
        assert_eq!(critical_tasks(&analysed).len(), 2);
    }

    #[test]
    fn isolated_task_floats_against_longer_chain() {
        let a = task("a", 5);
        let lone = task("lone", 2);

        let analysed = calculate_critical_path(&[a, lone], &[]).expect("acyclic");
        assert_eq!(analysed[1].total_float, 3);
        assert!(!analysed[1].is_critical);
        assert!(analysed[0].is_critical);
    }
}
