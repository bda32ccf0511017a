//! Shell command grammar.
//!
//! Each shell line is tokenized and parsed with clap into a [`ShellCommand`].
//! Commands are grouped by entity (`project`, `task`, `user`) with the
//! session and report commands at the top level.

use clap::{Parser, Subcommand};

use super::types::{ProjectTypeArg, TaskStatusArg, UserRoleArg};
use super::validators::{
    validate_budget, validate_email, validate_name, validate_project_id, validate_task_id,
    validate_team_size, validate_user_id,
};

/// One line of shell input
#[derive(Parser, Debug, Clone)]
#[command(name = "taskboard", no_binary_name = true, disable_version_flag = true)]
#[command(about = "Manage projects, tasks and users", long_about = None)]
pub struct ShellLine {
    /// Command to execute
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Available shell commands
#[derive(Subcommand, Debug, Clone)]
pub enum ShellCommand {
    /// Manage projects and their teams
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommand),

    /// Manage users
    #[command(subcommand)]
    User(UserCommand),

    /// Log in as an existing user
    Login {
        /// User ID
        #[arg(value_parser = validate_user_id)]
        user_id: String,
    },

    /// Log out the current user
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Show the project status report
    ///
    /// Lists task totals and completed counts per project, followed by the
    /// overall completion percentage.
    Report,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Project subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProjectCommand {
    /// Create a project
    Add(ProjectAddArgs),

    /// List all projects
    List,

    /// Show one project with its team
    Show {
        /// Project ID
        #[arg(value_parser = validate_project_id)]
        project_id: String,
    },

    /// Delete a project and release its team
    Delete {
        /// Project ID
        #[arg(value_parser = validate_project_id)]
        project_id: String,
    },

    /// List projects of one type
    Type {
        /// Project type
        #[arg(value_enum, ignore_case = true)]
        project_type: ProjectTypeArg,
    },

    /// List projects whose budget lies in a range (inclusive)
    Budget {
        /// Lowest budget
        #[arg(value_parser = validate_budget)]
        min: f64,

        /// Highest budget
        #[arg(value_parser = validate_budget)]
        max: f64,
    },

    /// Change a project's budget
    SetBudget {
        /// Project ID
        #[arg(value_parser = validate_project_id)]
        project_id: String,

        /// New budget
        #[arg(value_parser = validate_budget)]
        budget: f64,
    },

    /// Add a user to a project's team
    Assign {
        /// Project ID
        #[arg(value_parser = validate_project_id)]
        project_id: String,

        /// User ID
        #[arg(value_parser = validate_user_id)]
        user_id: String,
    },

    /// Remove a user from a project's team
    Unassign {
        /// Project ID
        #[arg(value_parser = validate_project_id)]
        project_id: String,

        /// User ID
        #[arg(value_parser = validate_user_id)]
        user_id: String,
    },

    /// List a project's team
    Members {
        /// Project ID
        #[arg(value_parser = validate_project_id)]
        project_id: String,
    },
}

/// Arguments for `project add`
#[derive(Parser, Debug, Clone)]
pub struct ProjectAddArgs {
    /// Project name
    #[arg(value_parser = validate_name)]
    pub name: String,

    /// Project type
    #[arg(short = 't', long = "type", value_enum, ignore_case = true)]
    pub project_type: ProjectTypeArg,

    /// Language (software) or hardware type (hardware)
    #[arg(short = 'a', long, alias = "language", alias = "hardware")]
    pub attribute: String,

    /// Maximum team size
    #[arg(short = 's', long, value_parser = validate_team_size)]
    pub team_size: usize,

    /// Budget
    #[arg(short, long, value_parser = validate_budget, default_value = "0")]
    pub budget: f64,

    /// Description
    #[arg(short = 'D', long, default_value = "")]
    pub description: String,
}

/// Task subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    /// Create a task (requires login)
    Add(TaskAddArgs),

    /// List all tasks
    List,

    /// Show one task
    Show {
        /// Task ID
        #[arg(value_parser = validate_task_id)]
        task_id: String,
    },

    /// Change a task's status (admin only)
    Status {
        /// Task ID
        #[arg(value_parser = validate_task_id)]
        task_id: String,

        /// New status
        #[arg(value_enum, ignore_case = true)]
        status: TaskStatusArg,
    },

    /// Set or clear a task's assignee (admin only)
    Assign {
        /// Task ID
        #[arg(value_parser = validate_task_id)]
        task_id: String,

        /// User ID; omit to clear the assignee
        #[arg(value_parser = validate_user_id)]
        user_id: Option<String>,
    },

    /// Delete a task (admin only)
    Delete {
        /// Task ID
        #[arg(value_parser = validate_task_id)]
        task_id: String,
    },

    /// List a project's tasks with its completion rate
    Project {
        /// Project ID
        #[arg(value_parser = validate_project_id)]
        project_id: String,
    },

    /// List the tasks assigned to a user
    User {
        /// User ID
        #[arg(value_parser = validate_user_id)]
        user_id: String,
    },

    /// Show a project's completion percentage
    Completion {
        /// Project ID
        #[arg(value_parser = validate_project_id)]
        project_id: String,
    },
}

/// Arguments for `task add`
#[derive(Parser, Debug, Clone)]
pub struct TaskAddArgs {
    /// Task name
    #[arg(value_parser = validate_name)]
    pub name: String,

    /// Owning project ID
    #[arg(short, long, value_parser = validate_project_id)]
    pub project: String,

    /// Initial status
    #[arg(short, long, value_enum, ignore_case = true, default_value = "pending")]
    pub status: TaskStatusArg,

    /// Assignee user ID
    #[arg(short, long, value_parser = validate_user_id)]
    pub assignee: Option<String>,
}

/// User subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum UserCommand {
    /// Register a user and log them in
    Add(UserAddArgs),

    /// List all users
    List,

    /// Show one user
    Show {
        /// User ID
        #[arg(value_parser = validate_user_id)]
        user_id: String,
    },

    /// List users holding a role
    Role {
        /// Role
        #[arg(value_enum, ignore_case = true)]
        role: UserRoleArg,
    },

    /// Change a user's email address
    Email {
        /// User ID
        #[arg(value_parser = validate_user_id)]
        user_id: String,

        /// New email address
        #[arg(value_parser = validate_email)]
        email: String,
    },

    /// Delete a user and drop them from every team and task
    Delete {
        /// User ID
        #[arg(value_parser = validate_user_id)]
        user_id: String,
    },
}

/// Arguments for `user add`
#[derive(Parser, Debug, Clone)]
pub struct UserAddArgs {
    /// Display name
    #[arg(value_parser = validate_name)]
    pub name: String,

    /// Email address
    #[arg(short, long, value_parser = validate_email)]
    pub email: String,

    /// Role
    #[arg(short, long, value_enum, ignore_case = true, default_value = "regular")]
    pub role: UserRoleArg,
}
