//! WBS forest queries over a flat task list.
//!
//! Leaf-ness is always derived from the current task set: a task is a
//! container iff some task names it as `parent_id`.

use crate::model::{Task, TaskId};
use std::collections::{HashMap, HashSet};

/// Ids referenced as someone's parent.
pub fn container_ids(tasks: &[Task]) -> HashSet<TaskId> {
    tasks.iter().filter_map(|task| task.parent_id).collect()
}

/// Direct children indices grouped by parent id, in input order.
pub fn children_by_parent(tasks: &[Task]) -> HashMap<TaskId, Vec<usize>> {
    let mut children: HashMap<TaskId, Vec<usize>> = HashMap::new();
    for (index, task) in tasks.iter().enumerate() {
        if let Some(parent_id) = task.parent_id {
            children.entry(parent_id).or_default().push(index);
        }
    }
    children
}

pub fn is_leaf(task_id: TaskId, tasks: &[Task]) -> bool {
    !tasks.iter().any(|task| task.parent_id == Some(task_id))
}

pub fn leaf_tasks(tasks: &[Task]) -> Vec<&Task> {
    let containers = container_ids(tasks);
    tasks
        .iter()
        .filter(|task| !containers.contains(&task.id))
        .collect()
}

pub fn container_tasks(tasks: &[Task]) -> Vec<&Task> {
    let containers = container_ids(tasks);
    tasks
        .iter()
        .filter(|task| containers.contains(&task.id))
        .collect()
}

/// Every descendant of `task_id`, depth-first in input order.
///
/// Malformed parent loops are visited at most once.
pub fn descendants(task_id: TaskId, tasks: &[Task]) -> Vec<&Task> {
    let children = children_by_parent(tasks);
    let mut result = Vec::new();
    let mut seen = HashSet::from([task_id]);
    let mut stack: Vec<usize> = children
        .get(&task_id)
        .map(|indices| indices.iter().rev().copied().collect())
        .unwrap_or_default();

    while let Some(index) = stack.pop() {
        let task = &tasks[index];
        if !seen.insert(task.id) {
            continue;
        }
        result.push(task);
        if let Some(indices) = children.get(&task.id) {
            stack.extend(indices.iter().rev().copied());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{container_ids, container_tasks, descendants, is_leaf, leaf_tasks};
    use crate::calendar::WorkingWeek;
    use crate::model::Task;
    use chrono::NaiveDate;

    fn task(name: &str) -> Task {
        let start = NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date");
        Task::new(name, start, 1, &WorkingWeek::default())
    }

    #[test]
    fn classifies_leaves_and_containers() {
        let root = task("root");
        let phase = task("phase").under(&root);
        let leaf_a = task("a").under(&phase);
        let leaf_b = task("b").under(&root);
        let tasks = vec![root.clone(), phase.clone(), leaf_a.clone(), leaf_b.clone()];

        let containers = container_ids(&tasks);
        assert!(containers.contains(&root.id));
        assert!(containers.contains(&phase.id));
        assert!(is_leaf(leaf_a.id, &tasks));
        assert!(!is_leaf(root.id, &tasks));

        let leaves: Vec<_> = leaf_tasks(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(leaves, vec![leaf_a.id, leaf_b.id]);
        assert_eq!(container_tasks(&tasks).len(), 2);
    }

    #[test]
    fn descendants_are_depth_first() {
        let root = task("root");
        let phase = task("phase").under(&root);
        let leaf_a = task("a").under(&phase);
        let leaf_b = task("b").under(&root);
        let tasks = vec![root.clone(), phase.clone(), leaf_b.clone(), leaf_a.clone()];

        let ids: Vec<_> = descendants(root.id, &tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![phase.id, leaf_a.id, leaf_b.id]);
        assert!(descendants(leaf_a.id, &tasks).is_empty());
    }
}
