//! Task service: CRUD, status changes and per-project completion.

use super::{Catalog, translate};
use crate::domain::{EntityId, EntityKind, NewTask, Task, TaskStatus};
use crate::error::Result;
use crate::storage::{IndexedStore, TaskQueries};
use tracing::info;

/// Owns the task store and the task ID generator.
#[derive(Debug, Clone)]
pub struct TaskService {
    catalog: Catalog<Task>,
}

impl TaskService {
    /// Create a service with `capacity` initial task slots
    pub fn new(capacity: usize) -> Self {
        Self {
            catalog: Catalog::new(EntityKind::Task, capacity),
        }
    }

    /// Read access to the task store
    pub fn store(&self) -> &IndexedStore<Task> {
        self.catalog.store()
    }

    /// Create a task and assign it the next identifier.
    ///
    /// Does not check that the project or assignee exist; see
    /// [`crate::app::Workspace::create_task`] for the checked variant.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` if the input fails validation
    /// - `Error::DuplicateIdentifier` if the derived slot is already taken
    pub fn create(&mut self, new_task: NewTask) -> Result<Task> {
        new_task.validate()?;
        let task = self.catalog.insert_with(|id| new_task.into_task(id))?;
        info!(id = %task.id, project_id = %task.project_id, "Created task");
        Ok(task)
    }

    /// Look up a task.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` for malformed or unknown identifiers.
    pub fn get_by_id(&self, id: &str) -> Result<&Task> {
        self.catalog.get(id)
    }

    /// All tasks in identifier order (empty when none exist)
    pub fn get_all(&self) -> Vec<&Task> {
        self.catalog.all()
    }

    /// All tasks, failing with `Error::EmptyStore` when none exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyStore` if no task is stored.
    pub fn require_all(&self) -> Result<Vec<&Task>> {
        self.catalog.require_all()
    }

    /// Number of stored tasks
    pub fn count(&self) -> usize {
        self.catalog.count()
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if the task does not exist.
    pub fn delete_by_id(&mut self, id: &str) -> Result<Task> {
        let task = self.catalog.delete(id)?;
        info!(id = %task.id, "Deleted task");
        Ok(task)
    }

    /// Set a task's status.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if the task does not exist.
    pub fn update_status(&mut self, id: &str, status: TaskStatus) -> Result<Task> {
        let task = self.catalog.modify(id, |task| {
            task.status = status;
            Ok(())
        })?;
        info!(id = %task.id, %status, "Updated task status");
        Ok(task)
    }

    /// Set or clear a task's assignee.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if the task does not exist.
    pub fn assign_to(&mut self, id: &str, user_id: Option<EntityId>) -> Result<Task> {
        self.catalog.modify(id, |task| {
            task.assigned_user_id = user_id;
            Ok(())
        })
    }

    /// Tasks that belong to `project_id`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `project_id` is blank.
    pub fn tasks_for_project(&self, project_id: &str) -> Result<Vec<&Task>> {
        self.store()
            .find_by_project_id(project_id)
            .map_err(|e| translate(EntityKind::Task, "", e))
    }

    /// Tasks assigned to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `user_id` is blank.
    pub fn tasks_for_user(&self, user_id: &str) -> Result<Vec<&Task>> {
        self.store()
            .find_by_assigned_user_id(user_id)
            .map_err(|e| translate(EntityKind::Task, "", e))
    }

    /// Percentage of a project's tasks that are completed.
    ///
    /// Returns `0.0` for a project with no tasks.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `project_id` is blank.
    pub fn completion_rate(&self, project_id: &str) -> Result<f64> {
        let tasks = self.tasks_for_project(project_id)?;
        let completed = tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .count();
        Ok(percentage(completed, tasks.len()))
    }

    /// Drop `user_id` as assignee from every task; returns how many changed
    pub fn unassign_user_everywhere(&mut self, user_id: &EntityId) -> Result<usize> {
        let ids: Vec<EntityId> = self
            .tasks_for_user(user_id.as_str())?
            .into_iter()
            .map(|task| task.id.clone())
            .collect();
        for id in &ids {
            self.assign_to(id.as_str(), None)?;
        }
        Ok(ids.len())
    }
}

impl Default for TaskService {
    fn default() -> Self {
        Self::new(EntityKind::Task.default_capacity())
    }
}

/// `100 * part / total`, or `0.0` when `total` is zero
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}
