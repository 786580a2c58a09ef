//! `RefCell`-backed project store.

use super::{ProjectRepository, RepoError, RepoResult};
use crate::model::{
    AssignmentId, Dependency, DependencyId, Holiday, ProjectConfig, ProjectId, ProjectSnapshot,
    Resource, ResourceAssignment, Task, WeeklyAllocation,
};
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;

/// Single-threaded in-memory repository over whole project snapshots.
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    projects: RefCell<HashMap<ProjectId, ProjectSnapshot>>,
    resources: RefCell<Vec<Resource>>,
    global_holidays: RefCell<Vec<Holiday>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `snapshot`, replacing any project with the same id.
    ///
    /// # Errors
    /// - `RepoError::Validation` when any record in the snapshot is invalid.
    pub fn insert_project(&self, snapshot: ProjectSnapshot) -> RepoResult<()> {
        snapshot.validate()?;
        debug!(
            "event=project_stored module=repo status=ok project={} tasks={} dependencies={}",
            snapshot.id,
            snapshot.tasks.len(),
            snapshot.dependencies.len()
        );
        self.projects.borrow_mut().insert(snapshot.id, snapshot);
        Ok(())
    }

    pub fn add_resource(&self, resource: Resource) {
        self.resources.borrow_mut().push(resource);
    }

    pub fn add_global_holiday(&self, holiday: Holiday) {
        self.global_holidays.borrow_mut().push(holiday);
    }

    /// Copy of the stored project, if present.
    pub fn snapshot(&self, project_id: ProjectId) -> Option<ProjectSnapshot> {
        self.projects.borrow().get(&project_id).cloned()
    }

    fn read<T>(
        &self,
        project_id: ProjectId,
        f: impl FnOnce(&ProjectSnapshot) -> T,
    ) -> RepoResult<T> {
        self.projects
            .borrow()
            .get(&project_id)
            .map(f)
            .ok_or(RepoError::ProjectNotFound(project_id))
    }

    fn write<T>(
        &self,
        project_id: ProjectId,
        f: impl FnOnce(&mut ProjectSnapshot) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let mut projects = self.projects.borrow_mut();
        let project = projects
            .get_mut(&project_id)
            .ok_or(RepoError::ProjectNotFound(project_id))?;
        f(project)
    }
}

impl ProjectRepository for InMemoryProjectRepository {
    fn load_tasks(&self, project_id: ProjectId) -> RepoResult<Vec<Task>> {
        self.read(project_id, |project| project.tasks.clone())
    }

    fn load_dependencies(&self, project_id: ProjectId) -> RepoResult<Vec<Dependency>> {
        self.read(project_id, |project| project.dependencies.clone())
    }

    fn load_config(&self, project_id: ProjectId) -> RepoResult<ProjectConfig> {
        self.read(project_id, |project| project.config.clone())
    }

    fn load_assignments(&self, project_id: ProjectId) -> RepoResult<Vec<ResourceAssignment>> {
        self.read(project_id, |project| project.assignments.clone())
    }

    fn load_resources(&self) -> RepoResult<Vec<Resource>> {
        Ok(self.resources.borrow().clone())
    }

    fn load_global_holidays(&self) -> RepoResult<Vec<Holiday>> {
        Ok(self.global_holidays.borrow().clone())
    }

    fn save_task_dates(&self, project_id: ProjectId, tasks: &[Task]) -> RepoResult<()> {
        self.write(project_id, |project| {
            let mut positions = Vec::with_capacity(tasks.len());
            for update in tasks {
                let position = project
                    .tasks
                    .iter()
                    .position(|task| task.id == update.id)
                    .ok_or(RepoError::TaskNotFound(update.id))?;
                let mut candidate = project.tasks[position].clone();
                candidate.start_date = update.start_date;
                candidate.end_date = update.end_date;
                candidate.duration = update.duration;
                candidate.validate()?;
                positions.push((position, candidate));
            }
            for (position, candidate) in positions {
                project.tasks[position] = candidate;
            }
            Ok(())
        })
    }

    fn insert_dependency(&self, project_id: ProjectId, dependency: &Dependency) -> RepoResult<()> {
        self.write(project_id, |project| {
            for endpoint in [dependency.predecessor_id, dependency.successor_id] {
                if project.task(endpoint).is_none() {
                    return Err(RepoError::TaskNotFound(endpoint));
                }
            }
            project.dependencies.push(dependency.clone());
            Ok(())
        })
    }

    fn delete_dependency(
        &self,
        project_id: ProjectId,
        dependency_id: DependencyId,
    ) -> RepoResult<bool> {
        self.write(project_id, |project| {
            let before = project.dependencies.len();
            project
                .dependencies
                .retain(|dependency| dependency.id != dependency_id);
            Ok(project.dependencies.len() != before)
        })
    }

    fn save_assignment_distribution(
        &self,
        project_id: ProjectId,
        assignment_id: AssignmentId,
        distribution: &[WeeklyAllocation],
    ) -> RepoResult<()> {
        self.write(project_id, |project| {
            let assignment = project
                .assignments
                .iter_mut()
                .find(|assignment| assignment.id == assignment_id)
                .ok_or(RepoError::AssignmentNotFound(assignment_id))?;
            assignment.weekly_distribution = distribution.to_vec();
            Ok(())
        })
    }
}
