//! Application context for shell command execution.
//!
//! [`Workspace`] owns one service per entity kind plus the login session, and
//! performs the checks that span more than one kind: a task's project and
//! assignee must exist, a project member must be a known user, deleting a
//! user removes them from every team and task.
//!
//! # Example
//!
//! ```
//! use taskboard::app::Workspace;
//! use taskboard::config::Config;
//!
//! let mut workspace = Workspace::from_config(&Config::default());
//! workspace.seed_sample_data().unwrap();
//! assert_eq!(workspace.projects().count(), 2);
//! ```

use crate::config::{Capacities, Config};
use crate::domain::{
    EntityId, EntityKind, NewProject, NewTask, NewUser, Project, ProjectDetails, Task, TaskStatus, User,
};
use crate::error::{Error, Result};
use crate::id_generation::{format_id, parse_index};
use crate::service::{
    ProjectService, ProjectStatus, Session, TaskService, UserService, status_report,
};
use tracing::{debug, info};

/// Services and session for one shell run.
#[derive(Debug, Clone)]
pub struct Workspace {
    projects: ProjectService,
    tasks: TaskService,
    users: UserService,
    session: Session,
}

impl Workspace {
    /// Create an empty workspace with the given store capacities.
    pub fn new(capacities: Capacities) -> Self {
        debug!(?capacities, "Creating workspace");
        Self {
            projects: ProjectService::new(capacities.projects, capacities.assignments),
            tasks: TaskService::new(capacities.tasks),
            users: UserService::new(capacities.users),
            session: Session::new(),
        }
    }

    /// Create an empty workspace sized by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.capacities)
    }

    /// Project service
    pub fn projects(&self) -> &ProjectService {
        &self.projects
    }

    /// Task service
    pub fn tasks(&self) -> &TaskService {
        &self.tasks
    }

    /// User service
    pub fn users(&self) -> &UserService {
        &self.users
    }

    /// Login session
    pub fn session(&self) -> &Session {
        &self.session
    }

    // ========== Projects ==========

    /// Create a project.
    ///
    /// # Errors
    ///
    /// See [`ProjectService::create`].
    pub fn create_project(&mut self, new_project: NewProject) -> Result<Project> {
        self.projects.create(new_project)
    }

    /// Delete a project and its team. Tasks that referenced it are kept.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if the project does not exist.
    pub fn delete_project(&mut self, id: &str) -> Result<Project> {
        self.projects.delete_by_id(id)
    }

    /// Change a project's budget.
    ///
    /// # Errors
    ///
    /// See [`ProjectService::update_budget`].
    pub fn update_budget(&mut self, id: &str, budget: f64) -> Result<Project> {
        self.projects.update_budget(id, budget)
    }

    /// Add a known user to a project's team.
    ///
    /// # Errors
    ///
    /// - `Error::EntityNotFound` if the user does not exist
    /// - otherwise as [`ProjectService::assign_user`]
    pub fn assign_member(&mut self, project_id: &str, user_id: &str) -> Result<()> {
        let user_id = self.users.get_by_id(user_id)?.id.clone();
        self.projects.assign_user(project_id, user_id)
    }

    /// Remove a user from a project's team.
    ///
    /// The user id is matched in canonical form, so `U0` removes `U0000`.
    ///
    /// # Errors
    ///
    /// - `Error::MalformedIdentifier` if `user_id` is not a user id
    /// - otherwise as [`ProjectService::remove_user`]
    pub fn remove_member(&mut self, project_id: &str, user_id: &str) -> Result<()> {
        let index = parse_index(user_id.trim(), EntityKind::User)?;
        self.projects
            .remove_user(project_id, &format_id(EntityKind::User, index))
    }

    /// Team members of a project that still exist as users.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProjectNotFound` if the project does not exist.
    pub fn members(&self, project_id: &str) -> Result<Vec<&User>> {
        Ok(self
            .projects
            .list_assigned(project_id)?
            .iter()
            .filter_map(|id| self.users.get_by_id(id.as_str()).ok())
            .collect())
    }

    // ========== Tasks ==========

    /// Create a task in an existing project. Requires a login.
    ///
    /// # Errors
    ///
    /// - `Error::NotLoggedIn` if nobody is logged in
    /// - `Error::ProjectNotFound` if the project does not exist
    /// - `Error::EntityNotFound` if the assignee does not exist
    /// - otherwise as [`TaskService::create`]
    pub fn create_task(&mut self, mut new_task: NewTask) -> Result<Task> {
        self.session.require_logged_in("add tasks")?;
        // Store canonical ids so later string matches see `P0000`, not `P0`
        new_task.project_id = self
            .require_project(new_task.project_id.as_str())?
            .id
            .clone();
        if let Some(user_id) = &new_task.assigned_user_id {
            let user_id = self.users.get_by_id(user_id.as_str())?.id.clone();
            new_task.assigned_user_id = Some(user_id);
        }
        self.tasks.create(new_task)
    }

    /// Change a task's status. Requires an admin login.
    ///
    /// # Errors
    ///
    /// - `Error::NotLoggedIn` or `Error::PermissionDenied` from the gate
    /// - `Error::EntityNotFound` if the task does not exist
    pub fn update_task_status(&mut self, id: &str, status: TaskStatus) -> Result<Task> {
        self.session.require_admin(&self.users, "update tasks")?;
        self.tasks.update_status(id, status)
    }

    /// Set or clear a task's assignee. Requires an admin login.
    ///
    /// # Errors
    ///
    /// - `Error::NotLoggedIn` or `Error::PermissionDenied` from the gate
    /// - `Error::EntityNotFound` if the task or the user does not exist
    pub fn assign_task(&mut self, id: &str, user_id: Option<&str>) -> Result<Task> {
        self.session.require_admin(&self.users, "update tasks")?;
        let user_id = match user_id {
            Some(user_id) => Some(self.users.get_by_id(user_id)?.id.clone()),
            None => None,
        };
        self.tasks.assign_to(id, user_id)
    }

    /// Delete a task. Requires an admin login.
    ///
    /// # Errors
    ///
    /// - `Error::NotLoggedIn` or `Error::PermissionDenied` from the gate
    /// - `Error::EntityNotFound` if the task does not exist
    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        self.session.require_admin(&self.users, "delete tasks")?;
        self.tasks.delete_by_id(id)
    }

    /// Tasks of an existing project.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProjectNotFound` if the project does not exist.
    pub fn project_tasks(&self, project_id: &str) -> Result<Vec<&Task>> {
        let project = self.require_project(project_id)?;
        self.tasks.tasks_for_project(project.id.as_str())
    }

    /// Completion percentage of an existing project.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProjectNotFound` if the project does not exist.
    pub fn completion_rate(&self, project_id: &str) -> Result<f64> {
        let project = self.require_project(project_id)?;
        self.tasks.completion_rate(project.id.as_str())
    }

    // ========== Users & session ==========

    /// Register a user and log them in.
    ///
    /// # Errors
    ///
    /// See [`UserService::create`].
    pub fn sign_up(&mut self, new_user: NewUser) -> Result<User> {
        let user = self.users.create(new_user)?;
        self.session.login(&self.users, user.id.as_str())?;
        Ok(user)
    }

    /// Change a user's email address.
    ///
    /// # Errors
    ///
    /// See [`UserService::update_email`].
    pub fn update_email(&mut self, id: &str, email: &str) -> Result<User> {
        self.users.update_email(id, email)
    }

    /// Delete a user, dropping them from every team and task.
    ///
    /// Logs the session out if the deleted user was logged in.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if the user does not exist.
    pub fn delete_user(&mut self, id: &str) -> Result<User> {
        let user = self.users.delete_by_id(id)?;
        let teams = self.projects.forget_user(&user.id);
        let tasks = self.tasks.unassign_user_everywhere(&user.id)?;
        if self.session.current() == Some(&user.id) {
            self.session.logout();
        }
        info!(id = %user.id, teams, tasks, "Removed user from teams and tasks");
        Ok(user)
    }

    /// Log in as an existing user.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if the user does not exist.
    pub fn login(&mut self, id: &str) -> Result<User> {
        self.session.login(&self.users, id)
    }

    /// Log out; returns who was logged in
    pub fn logout(&mut self) -> Option<EntityId> {
        self.session.logout()
    }

    /// The logged-in user
    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user(&self.users)
    }

    // ========== Reports ==========

    /// Per-project task counts
    pub fn report(&self) -> Vec<ProjectStatus> {
        status_report(&self.projects, &self.tasks)
    }

    /// Add the two sample projects.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateIdentifier` if their slots are already taken.
    pub fn seed_sample_data(&mut self) -> Result<()> {
        let samples = [
            NewProject {
                name: "AI System".to_string(),
                description: "Build an AI model".to_string(),
                details: ProjectDetails::Software {
                    language: "Java".to_string(),
                },
                team_size: 5,
                budget: 1500.0,
            },
            NewProject {
                name: "IoT Device".to_string(),
                description: "Create a smart sensor".to_string(),
                details: ProjectDetails::Hardware {
                    hardware_type: "Microcontroller".to_string(),
                },
                team_size: 3,
                budget: 1500.0,
            },
        ];
        for sample in samples {
            self.projects.create(sample)?;
        }
        info!(projects = self.projects.count(), "Seeded sample data");
        Ok(())
    }

    fn require_project(&self, project_id: &str) -> Result<&Project> {
        self.projects
            .get_by_id(project_id)
            .map_err(|_| Error::ProjectNotFound(project_id.trim().to_string()))
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(Capacities::default())
    }
}
