//! Cycle detection for dependency edits.

use super::DependencyGraph;
use crate::model::{Dependency, TaskId};
use crate::schedule::{ScheduleError, ScheduleResult};
use log::warn;
use std::collections::HashSet;

/// Whether adding `new_edge` to `existing` creates a cycle reachable from
/// the new edge's predecessor.
///
/// Self-loops are always reported as cycles.
pub fn detect_cycle(new_edge: &Dependency, existing: &[Dependency]) -> bool {
    if new_edge.is_self_loop() {
        return true;
    }

    let mut edges = Vec::with_capacity(existing.len() + 1);
    edges.extend_from_slice(existing);
    edges.push(new_edge.clone());
    let graph = DependencyGraph::from_dependencies(&edges);

    let mut visited = HashSet::new();
    reaches_cycle(&graph, new_edge.predecessor_id, &mut visited)
}

/// Whether any cycle exists anywhere in `dependencies`.
pub fn has_cycle(dependencies: &[Dependency]) -> bool {
    let graph = DependencyGraph::from_dependencies(dependencies);
    let mut visited = HashSet::new();
    graph
        .nodes()
        .iter()
        .any(|node| !visited.contains(node) && reaches_cycle(&graph, *node, &mut visited))
}

/// Edit-time check for a proposed dependency.
///
/// # Errors
/// - `ScheduleError::SelfDependency` for `predecessor == successor`.
/// - `ScheduleError::DependencyCycle` when the edge would close a cycle.
pub fn validate_dependency(new_edge: &Dependency, existing: &[Dependency]) -> ScheduleResult<()> {
    if new_edge.is_self_loop() {
        warn!(
            "event=dependency_rejected module=graph status=error reason=self_loop task={}",
            new_edge.predecessor_id
        );
        return Err(ScheduleError::SelfDependency(new_edge.predecessor_id));
    }
    if detect_cycle(new_edge, existing) {
        warn!(
            "event=dependency_rejected module=graph status=error reason=cycle predecessor={} successor={}",
            new_edge.predecessor_id, new_edge.successor_id
        );
        return Err(ScheduleError::DependencyCycle {
            predecessor_id: new_edge.predecessor_id,
            successor_id: new_edge.successor_id,
        });
    }
    Ok(())
}

/// Iterative DFS from `start`; a successor still on the recursion stack
/// closes a cycle.
///
/// Frames are `(node, next successor index)` so deep graphs never grow the
/// call stack.
fn reaches_cycle(graph: &DependencyGraph, start: TaskId, visited: &mut HashSet<TaskId>) -> bool {
    if !visited.insert(start) {
        return false;
    }
    let mut on_stack: HashSet<TaskId> = HashSet::from([start]);
    let mut frames: Vec<(TaskId, usize)> = vec![(start, 0)];

    while let Some(frame) = frames.last_mut() {
        let (node, cursor) = *frame;
        match graph.successors(node).get(cursor) {
            Some(edge) => {
                frame.1 += 1;
                let next = edge.task_id;
                if on_stack.contains(&next) {
                    return true;
                }
                if visited.insert(next) {
                    on_stack.insert(next);
                    frames.push((next, 0));
                }
            }
            None => {
                on_stack.remove(&node);
                frames.pop();
            }
        }
    }
    false
}
