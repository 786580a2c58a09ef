//! Completion percentages derived from actual tracking.
//!
//! A leaf is either done (100, `actual_duration` tracked) or not (0). A
//! container is the duration-weighted mean of its direct children, rounded
//! to a whole percent at every level.

use super::hierarchy::children_by_parent;
use crate::model::{Task, TaskId};
use std::collections::{HashMap, HashSet};

/// Progress of `task` within `tasks`, 0..=100.
pub fn calculate_task_progress(task: &Task, tasks: &[Task]) -> u8 {
    let children = children_by_parent(tasks);
    let mut calculator = ProgressCalculator {
        tasks,
        children: &children,
        memo: HashMap::new(),
        visiting: HashSet::new(),
    };
    calculator.progress_of(task)
}

/// `(id, percent)` for every task, in input order.
pub fn calculate_all_task_progress(tasks: &[Task]) -> Vec<(TaskId, u8)> {
    let children = children_by_parent(tasks);
    let mut calculator = ProgressCalculator {
        tasks,
        children: &children,
        memo: HashMap::new(),
        visiting: HashSet::new(),
    };
    tasks
        .iter()
        .map(|task| (task.id, calculator.progress_of(task)))
        .collect()
}

struct ProgressCalculator<'a> {
    tasks: &'a [Task],
    children: &'a HashMap<TaskId, Vec<usize>>,
    memo: HashMap<TaskId, u8>,
    visiting: HashSet<TaskId>,
}

impl ProgressCalculator<'_> {
    fn progress_of(&mut self, task: &Task) -> u8 {
        if let Some(percent) = self.memo.get(&task.id) {
            return *percent;
        }
        let (tasks, children) = (self.tasks, self.children);
        let Some(indices) = children.get(&task.id) else {
            return if task.is_complete() { 100 } else { 0 };
        };
        // Parent loops are malformed input; treat the repeat as not started.
        if !self.visiting.insert(task.id) {
            return 0;
        }

        let total: u64 = indices
            .iter()
            .map(|index| u64::from(tasks[*index].duration))
            .sum();
        let mut completed = 0.0f64;
        for index in indices {
            let child = &tasks[*index];
            let child_progress = self.progress_of(child);
            completed += f64::from(child.duration) * f64::from(child_progress) / 100.0;
        }
        let percent = if total == 0 {
            0
        } else {
            ((completed / total as f64) * 100.0).round().clamp(0.0, 100.0) as u8
        };

        self.visiting.remove(&task.id);
        self.memo.insert(task.id, percent);
        percent
    }
}
