//! Schedule use-case service.
//!
//! # Responsibility
//! - Run propagation, CPM and allocation over a stored project.
//! - Write back only what changed.
//! - Guard dependency edits with cycle detection before persistence.
//!
//! # Invariants
//! - A rejected dependency edit leaves the store untouched.
//! - Recalculating an already converged project writes nothing.
//! - Manual weekly distributions are never overwritten.

use crate::calendar::combined_holidays;
use crate::graph::validate_dependency;
use crate::model::{
    AssignmentId, Dependency, DependencyId, ProjectId, Task, TaskId, ValidationError,
};
use crate::repo::{ProjectRepository, RepoError};
use crate::resource::{recalculate_weekly_allocation, AvailabilityCalendar};
use crate::schedule::{
    analyze_critical_path, calculate_actual_dates, recalculate_task_dates_with,
    schedule_changes, CriticalPathAnalysis, PropagationOptions, ScheduleChange, ScheduleError,
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Result type used by schedule service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from schedule service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Engine failure, including rejected dependency edits.
    Schedule(ScheduleError),
    /// A record failed validation.
    Validation(ValidationError),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schedule(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Schedule(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ScheduleError> for ServiceError {
    fn from(value: ScheduleError) -> Self {
        Self::Schedule(value)
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Outcome of one stored-project recalculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Tasks whose planned span or duration was written back.
    pub changes: Vec<ScheduleChange>,
    pub passes: usize,
    pub converged: bool,
}

/// Schedule service facade.
pub struct ScheduleService<R: ProjectRepository> {
    repo: R,
    options: PropagationOptions,
}

impl<R: ProjectRepository> ScheduleService<R> {
    /// Creates service from repository implementation.
    pub fn new(repo: R) -> Self {
        Self::with_options(repo, PropagationOptions::default())
    }

    pub fn with_options(repo: R, options: PropagationOptions) -> Self {
        Self { repo, options }
    }

    /// Recalculates planned dates of a stored project and persists the
    /// tasks that moved.
    ///
    /// # Errors
    /// - `ServiceError::Schedule` when stored dependencies contain a cycle;
    ///   nothing is written in that case.
    /// - `ServiceError::Repo` for load/save failures.
    pub fn recalculate_schedule(&self, project_id: ProjectId) -> ServiceResult<ScheduleReport> {
        let started_at = Instant::now();
        info!(
            "event=schedule_recalculate module=service status=start project={}",
            project_id
        );

        let tasks = self.repo.load_tasks(project_id)?;
        let dependencies = self.repo.load_dependencies(project_id)?;
        let config = self.repo.load_config(project_id)?;

        let outcome = match recalculate_task_dates_with(
            &tasks,
            &dependencies,
            &config.working_days,
            self.options,
        ) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(
                    "event=schedule_recalculate module=service status=error project={} duration_ms={} error={}",
                    project_id,
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        let changes = schedule_changes(&tasks, &outcome.tasks);
        if !changes.is_empty() {
            let changed: HashSet<TaskId> = changes.iter().map(|change| change.task_id).collect();
            let updates: Vec<Task> = outcome
                .tasks
                .iter()
                .filter(|task| changed.contains(&task.id))
                .cloned()
                .collect();
            self.repo.save_task_dates(project_id, &updates)?;
        }

        info!(
            "event=schedule_recalculate module=service status=ok project={} changes={} passes={} converged={} duration_ms={}",
            project_id,
            changes.len(),
            outcome.passes,
            outcome.converged,
            started_at.elapsed().as_millis()
        );
        Ok(ScheduleReport {
            changes,
            passes: outcome.passes,
            converged: outcome.converged,
        })
    }

    /// Validates and stores a new finish-to-start dependency.
    ///
    /// # Errors
    /// - `ScheduleError::UnknownTask` when an endpoint is not in the project.
    /// - `ScheduleError::SelfDependency` / `ScheduleError::DependencyCycle`
    ///   when the edge is rejected; the store is left untouched.
    pub fn create_dependency(
        &self,
        project_id: ProjectId,
        predecessor_id: TaskId,
        successor_id: TaskId,
        lag: u32,
    ) -> ServiceResult<Dependency> {
        let tasks = self.repo.load_tasks(project_id)?;
        for endpoint in [predecessor_id, successor_id] {
            if !tasks.iter().any(|task| task.id == endpoint) {
                return Err(ScheduleError::UnknownTask(endpoint).into());
            }
        }

        let existing = self.repo.load_dependencies(project_id)?;
        let dependency = Dependency::new(predecessor_id, successor_id).with_lag(lag);
        validate_dependency(&dependency, &existing)?;
        self.repo.insert_dependency(project_id, &dependency)?;

        info!(
            "event=dependency_created module=service status=ok project={} dependency={} lag={}",
            project_id, dependency.id, lag
        );
        Ok(dependency)
    }

    /// Removes a dependency; returns whether it existed.
    pub fn delete_dependency(
        &self,
        project_id: ProjectId,
        dependency_id: DependencyId,
    ) -> ServiceResult<bool> {
        let removed = self.repo.delete_dependency(project_id, dependency_id)?;
        info!(
            "event=dependency_deleted module=service status=ok project={} dependency={} removed={}",
            project_id, dependency_id, removed
        );
        Ok(removed)
    }

    /// CPM analysis of the stored project.
    pub fn critical_path(&self, project_id: ProjectId) -> ServiceResult<CriticalPathAnalysis> {
        let tasks = self.repo.load_tasks(project_id)?;
        let dependencies = self.repo.load_dependencies(project_id)?;
        Ok(analyze_critical_path(&tasks, &dependencies)?)
    }

    /// Actual-date track of the stored project. Read-only.
    pub fn actual_schedule(&self, project_id: ProjectId) -> ServiceResult<Vec<Task>> {
        let tasks = self.repo.load_tasks(project_id)?;
        let dependencies = self.repo.load_dependencies(project_id)?;
        let config = self.repo.load_config(project_id)?;
        Ok(calculate_actual_dates(
            &tasks,
            &dependencies,
            &config.working_days,
        )?)
    }

    /// Recomputes weekly distributions of non-manual assignments from their
    /// task's current span and persists those that changed.
    ///
    /// Returns the ids of rewritten assignments.
    pub fn redistribute_assignments(
        &self,
        project_id: ProjectId,
    ) -> ServiceResult<Vec<AssignmentId>> {
        let tasks = self.repo.load_tasks(project_id)?;
        let config = self.repo.load_config(project_id)?;
        let assignments = self.repo.load_assignments(project_id)?;
        let resources = self.repo.load_resources()?;
        let global_holidays = self.repo.load_global_holidays()?;

        let holidays = combined_holidays(&global_holidays, &config);
        let calendar = AvailabilityCalendar::new(&config.working_days, &holidays);
        let mut rewritten = Vec::new();

        for assignment in assignments.iter().filter(|a| !a.is_manual_distribution) {
            let Some(task) = tasks.iter().find(|task| task.id == assignment.task_id) else {
                warn!(
                    "event=assignment_skipped module=service status=skipped assignment={} reason=unknown_task",
                    assignment.id
                );
                continue;
            };
            let scoped = resources
                .iter()
                .find(|resource| resource.id == assignment.resource_id)
                .map_or(calendar, |resource| calendar.with_resource(resource));

            let distribution = recalculate_weekly_allocation(assignment, &task.span(), &scoped);
            if distribution != assignment.weekly_distribution {
                self.repo
                    .save_assignment_distribution(project_id, assignment.id, &distribution)?;
                rewritten.push(assignment.id);
            }
        }

        info!(
            "event=assignments_redistributed module=service status=ok project={} rewritten={}",
            project_id,
            rewritten.len()
        );
        Ok(rewritten)
    }
}
