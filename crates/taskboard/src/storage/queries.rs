//! Entity-specific linear-scan queries over [`IndexedStore`].
//!
//! Each trait is implemented for the store of one entity kind. Results come
//! back in ascending slot order; nothing here mutates the store.

use super::{IndexedStore, StoreError, StoreResult};
use crate::domain::{Project, Task, User};

/// Queries over the project store
pub trait ProjectQueries {
    /// Projects whose type name matches `project_type`, ignoring case.
    ///
    /// # Errors
    ///
    /// `StoreError::InvalidArgument` if `project_type` is blank.
    fn find_by_type(&self, project_type: &str) -> StoreResult<Vec<&Project>>;

    /// Projects whose budget lies in `[min, max]`.
    ///
    /// # Errors
    ///
    /// `StoreError::InvalidArgument` if either bound is NaN or negative, or
    /// `min > max`.
    fn find_by_budget_range(&self, min: f64, max: f64) -> StoreResult<Vec<&Project>>;
}

/// Queries over the task store
pub trait TaskQueries {
    /// Tasks belonging to `project_id`.
    ///
    /// # Errors
    ///
    /// `StoreError::InvalidArgument` if `project_id` is blank.
    fn find_by_project_id(&self, project_id: &str) -> StoreResult<Vec<&Task>>;

    /// Tasks assigned to `user_id`.
    ///
    /// # Errors
    ///
    /// `StoreError::InvalidArgument` if `user_id` is blank.
    fn find_by_assigned_user_id(&self, user_id: &str) -> StoreResult<Vec<&Task>>;
}

/// Queries over the user store
pub trait UserQueries {
    /// Users whose role name matches `role`, ignoring case.
    ///
    /// # Errors
    ///
    /// `StoreError::InvalidArgument` if `role` is blank.
    fn find_by_role(&self, role: &str) -> StoreResult<Vec<&User>>;
}

fn require_key<'a>(name: &str, value: &'a str) -> StoreResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidArgument(format!(
            "{name} filter cannot be empty"
        )));
    }
    Ok(trimmed)
}

impl ProjectQueries for IndexedStore<Project> {
    fn find_by_type(&self, project_type: &str) -> StoreResult<Vec<&Project>> {
        let wanted = require_key("type", project_type)?;
        Ok(self.filter(|project| {
            project
                .project_type()
                .to_string()
                .eq_ignore_ascii_case(wanted)
        }))
    }

    fn find_by_budget_range(&self, min: f64, max: f64) -> StoreResult<Vec<&Project>> {
        if min.is_nan() || max.is_nan() {
            return Err(StoreError::InvalidArgument(
                "budget bounds must be numbers".to_string(),
            ));
        }
        if min < 0.0 || max < 0.0 {
            return Err(StoreError::InvalidArgument(
                "budget bounds cannot be negative".to_string(),
            ));
        }
        if min > max {
            return Err(StoreError::InvalidArgument(format!(
                "minimum budget {min} exceeds maximum {max}"
            )));
        }
        Ok(self.filter(|project| project.budget >= min && project.budget <= max))
    }
}

impl TaskQueries for IndexedStore<Task> {
    fn find_by_project_id(&self, project_id: &str) -> StoreResult<Vec<&Task>> {
        let wanted = require_key("project id", project_id)?;
        Ok(self.filter(|task| task.project_id.as_str() == wanted))
    }

    fn find_by_assigned_user_id(&self, user_id: &str) -> StoreResult<Vec<&Task>> {
        let wanted = require_key("user id", user_id)?;
        Ok(self.filter(|task| {
            task.assigned_user_id
                .as_ref()
                .is_some_and(|assigned| assigned.as_str() == wanted)
        }))
    }
}

impl UserQueries for IndexedStore<User> {
    fn find_by_role(&self, role: &str) -> StoreResult<Vec<&User>> {
        let wanted = require_key("role", role)?;
        Ok(self.filter(|user| user.role.to_string().eq_ignore_ascii_case(wanted)))
    }
}
