//! Per-project status report.

use super::task::percentage;
use super::{ProjectService, TaskService};
use crate::domain::{EntityId, TaskStatus};
use serde::Serialize;

/// Task counts for one project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectStatus {
    /// Project identifier
    pub project_id: EntityId,
    /// Project name
    pub name: String,
    /// Number of tasks in the project
    pub total: usize,
    /// Number of completed tasks
    pub completed: usize,
}

impl ProjectStatus {
    /// Completion percentage (`0.0` when the project has no tasks)
    pub fn completion(&self) -> f64 {
        percentage(self.completed, self.total)
    }
}

/// One row per existing project, in identifier order.
pub fn status_report(projects: &ProjectService, tasks: &TaskService) -> Vec<ProjectStatus> {
    projects
        .get_all()
        .into_iter()
        .map(|project| {
            let (total, completed) = tasks
                .get_all()
                .into_iter()
                .filter(|task| task.project_id == project.id)
                .fold((0, 0), |(total, completed), task| {
                    let done = usize::from(task.status == TaskStatus::Completed);
                    (total + 1, completed + done)
                });
            ProjectStatus {
                project_id: project.id.clone(),
                name: project.name.clone(),
                total,
                completed,
            }
        })
        .collect()
}

/// Completed tasks as a percentage of all reported tasks.
///
/// Counts are pooled across projects; `0.0` when the report holds no tasks.
pub fn overall_completion(report: &[ProjectStatus]) -> f64 {
    let (total, completed) = report
        .iter()
        .fold((0, 0), |(t, c), row| (t + row.total, c + row.completed));
    percentage(completed, total)
}
