//! Adjacency views over a dependency list.

use crate::model::{Dependency, TaskId};
use crate::schedule::{ScheduleError, ScheduleResult};
use log::{error, warn};
use std::collections::{HashMap, HashSet, VecDeque};

/// One neighbor of a node together with the lag of the connecting edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub task_id: TaskId,
    pub lag: u32,
}

/// Predecessor/successor adjacency for a fixed node set.
///
/// Node order is the order ids were supplied in and drives every
/// deterministic traversal below.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<TaskId>,
    successors: HashMap<TaskId, Vec<Edge>>,
    predecessors: HashMap<TaskId, Vec<Edge>>,
    lags: HashMap<(TaskId, TaskId), u32>,
    skipped: usize,
}

impl DependencyGraph {
    /// Builds the graph over `task_ids`, skipping edges with unknown
    /// endpoints.
    pub fn build<I>(task_ids: I, dependencies: &[Dependency]) -> Self
    where
        I: IntoIterator<Item = TaskId>,
    {
        let mut graph = Self::default();
        let mut seen = HashSet::new();
        for id in task_ids {
            if seen.insert(id) {
                graph.add_node(id);
            }
        }

        for dependency in dependencies {
            let known = seen.contains(&dependency.predecessor_id)
                && seen.contains(&dependency.successor_id);
            if !known {
                warn!(
                    "event=dependency_skipped module=graph status=skipped dependency={} predecessor={} successor={} reason=unknown_task",
                    dependency.id, dependency.predecessor_id, dependency.successor_id
                );
                graph.skipped += 1;
                continue;
            }
            graph.add_edge(dependency);
        }
        graph
    }

    /// Builds the graph over every endpoint referenced by `dependencies`.
    pub fn from_dependencies(dependencies: &[Dependency]) -> Self {
        let mut graph = Self::default();
        let mut seen = HashSet::new();
        for dependency in dependencies {
            for id in [dependency.predecessor_id, dependency.successor_id] {
                if seen.insert(id) {
                    graph.add_node(id);
                }
            }
            graph.add_edge(dependency);
        }
        graph
    }

    fn add_node(&mut self, id: TaskId) {
        self.nodes.push(id);
        self.successors.insert(id, Vec::new());
        self.predecessors.insert(id, Vec::new());
    }

    fn add_edge(&mut self, dependency: &Dependency) {
        let (from, to, lag) = (
            dependency.predecessor_id,
            dependency.successor_id,
            dependency.lag,
        );
        self.successors
            .entry(from)
            .or_default()
            .push(Edge { task_id: to, lag });
        self.predecessors
            .entry(to)
            .or_default()
            .push(Edge { task_id: from, lag });
        // Duplicate edges keep the strictest lag.
        let entry = self.lags.entry((from, to)).or_insert(lag);
        *entry = (*entry).max(lag);
    }

    pub fn nodes(&self) -> &[TaskId] {
        &self.nodes
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.successors.contains_key(&id)
    }

    pub fn predecessors(&self, id: TaskId) -> &[Edge] {
        self.predecessors.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn successors(&self, id: TaskId) -> &[Edge] {
        self.successors.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lag of the edge `predecessor -> successor`, if present.
    pub fn lag(&self, predecessor: TaskId, successor: TaskId) -> Option<u32> {
        self.lags.get(&(predecessor, successor)).copied()
    }

    /// Number of input dependencies dropped for referencing unknown tasks.
    pub fn skipped_dependencies(&self) -> usize {
        self.skipped
    }

    /// Kahn topological order.
    ///
    /// Ties are resolved FIFO in node order, so the result is stable for a
    /// given input.
    ///
    /// # Errors
    /// - `ScheduleError::CyclicDependency` when some nodes cannot be ordered.
    pub fn topological_order(&self) -> ScheduleResult<Vec<TaskId>> {
        let mut in_degree: HashMap<TaskId, usize> = self
            .nodes
            .iter()
            .map(|id| (*id, self.predecessors(*id).len()))
            .collect();

        let mut queue: VecDeque<TaskId> = self
            .nodes
            .iter()
            .copied()
            .filter(|id| in_degree.get(id) == Some(&0))
            .collect();
        let mut sorted = Vec::with_capacity(self.nodes.len());

        while let Some(current) = queue.pop_front() {
            sorted.push(current);
            for edge in self.successors(current) {
                if let Some(degree) = in_degree.get_mut(&edge.task_id) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(edge.task_id);
                    }
                }
            }
        }

        if sorted.len() < self.nodes.len() {
            let placed: HashSet<TaskId> = sorted.iter().copied().collect();
            let unresolved: Vec<TaskId> = self
                .nodes
                .iter()
                .copied()
                .filter(|id| !placed.contains(id))
                .collect();
            error!(
                "event=cycle_detected module=graph status=error sorted={} total={}",
                sorted.len(),
                self.nodes.len()
            );
            return Err(ScheduleError::CyclicDependency { unresolved });
        }
        Ok(sorted)
    }
}
