//! Persistence collaborator contract.
//!
//! # Responsibility
//! - Define the data access the schedule service needs from a host store.
//! - Provide an in-memory implementation for tests and storage-less hosts.
//!
//! # Invariants
//! - Implementations must run record `validate()` before every write.
//! - Missing projects and records surface as semantic `*NotFound` errors,
//!   distinct from backend failures.
//! - Writes only touch the fields they name; a date update never rewrites a
//!   task's identity, hierarchy or tracking data.

mod memory;

pub use memory::InMemoryProjectRepository;

use crate::model::{
    AssignmentId, Dependency, DependencyId, Holiday, ProjectConfig, ProjectId, Resource,
    ResourceAssignment, Task, TaskId, ValidationError, WeeklyAllocation,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by repository operations.
pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// No project with this id.
    ProjectNotFound(ProjectId),
    /// No task with this id in the project.
    TaskNotFound(TaskId),
    /// No assignment with this id in the project.
    AssignmentNotFound(AssignmentId),
    /// A record failed validation before write.
    Validation(ValidationError),
    /// Host storage failure.
    Backend(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::AssignmentNotFound(id) => write!(f, "assignment not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "storage error: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Store-side operations the schedule service relies on.
pub trait ProjectRepository {
    /// Loads every task of a project.
    fn load_tasks(&self, project_id: ProjectId) -> RepoResult<Vec<Task>>;
    /// Loads every dependency of a project.
    fn load_dependencies(&self, project_id: ProjectId) -> RepoResult<Vec<Dependency>>;
    /// Loads project calendar settings.
    fn load_config(&self, project_id: ProjectId) -> RepoResult<ProjectConfig>;
    /// Loads every resource assignment of a project.
    fn load_assignments(&self, project_id: ProjectId) -> RepoResult<Vec<ResourceAssignment>>;
    /// Loads all resources known to the store.
    fn load_resources(&self) -> RepoResult<Vec<Resource>>;
    /// Loads global holidays shared across projects.
    fn load_global_holidays(&self) -> RepoResult<Vec<Holiday>>;
    /// Persists start, end and duration of the given tasks.
    ///
    /// Either every task is written or none is.
    fn save_task_dates(&self, project_id: ProjectId, tasks: &[Task]) -> RepoResult<()>;
    /// Stores a new dependency.
    fn insert_dependency(&self, project_id: ProjectId, dependency: &Dependency) -> RepoResult<()>;
    /// Removes one dependency; returns whether it existed.
    fn delete_dependency(
        &self,
        project_id: ProjectId,
        dependency_id: DependencyId,
    ) -> RepoResult<bool>;
    /// Replaces the weekly distribution of one assignment.
    fn save_assignment_distribution(
        &self,
        project_id: ProjectId,
        assignment_id: AssignmentId,
        distribution: &[WeeklyAllocation],
    ) -> RepoResult<()>;
}

impl<T: ProjectRepository + ?Sized> ProjectRepository for &T {
    fn load_tasks(&self, project_id: ProjectId) -> RepoResult<Vec<Task>> {
        (**self).load_tasks(project_id)
    }

    fn load_dependencies(&self, project_id: ProjectId) -> RepoResult<Vec<Dependency>> {
        (**self).load_dependencies(project_id)
    }

    fn load_config(&self, project_id: ProjectId) -> RepoResult<ProjectConfig> {
        (**self).load_config(project_id)
    }

    fn load_assignments(&self, project_id: ProjectId) -> RepoResult<Vec<ResourceAssignment>> {
        (**self).load_assignments(project_id)
    }

    fn load_resources(&self) -> RepoResult<Vec<Resource>> {
        (**self).load_resources()
    }

    fn load_global_holidays(&self) -> RepoResult<Vec<Holiday>> {
        (**self).load_global_holidays()
    }

    fn save_task_dates(&self, project_id: ProjectId, tasks: &[Task]) -> RepoResult<()> {
        (**self).save_task_dates(project_id, tasks)
    }

    fn insert_dependency(&self, project_id: ProjectId, dependency: &Dependency) -> RepoResult<()> {
        (**self).insert_dependency(project_id, dependency)
    }

    fn delete_dependency(
        &self,
        project_id: ProjectId,
        dependency_id: DependencyId,
    ) -> RepoResult<bool> {
        (**self).delete_dependency(project_id, dependency_id)
    }

    fn save_assignment_distribution(
        &self,
        project_id: ProjectId,
        assignment_id: AssignmentId,
        distribution: &[WeeklyAllocation],
    ) -> RepoResult<()> {
        (**self).save_assignment_distribution(project_id, assignment_id, distribution)
    }
}
