//! Output formatting for shell commands.
//!
//! This module formats command results either as human-readable text or as
//! JSON for programmatic use. Every function writes to a caller-supplied
//! writer so the shell can target stdout or an in-memory buffer.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors)

pub mod color;

use crate::domain::{Project, ProjectType, Task, User};
use crate::service::ProjectStatus;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, info, success, warning};

use color::{bold, colorize_id, colorize_role, colorize_status, dimmed};

// ============================================================================
// Output Configuration
// ============================================================================

/// Configuration for output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `TASKBOARD_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("NO_COLOR").ok().as_deref(),
            env::var("TASKBOARD_COLOR").ok().as_deref(),
        )
    }

    fn from_vars(no_color: Option<&str>, taskboard_color: Option<&str>) -> Self {
        // https://no-color.org/
        if no_color.is_some() {
            return Self { use_colors: false };
        }
        let use_colors = match taskboard_color {
            None => true,
            Some(v) if v.is_empty() || v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") => false,
            Some(v) => {
                tracing::warn!(
                    env_var = "TASKBOARD_COLOR",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                true
            }
        };
        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// JSON
// ============================================================================

/// Write any serializable value as pretty-printed JSON
pub fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

// ============================================================================
// Text Formatting
// ============================================================================

/// Write a section header
pub fn write_title<W: Write>(w: &mut W, title: &str, config: &OutputConfig) -> io::Result<()> {
    writeln!(w, "{}", bold(title, config))?;
    writeln!(w, "{}", dimmed(&"-".repeat(title.chars().count()), config))
}

/// Write full details of one project
pub fn write_project<W: Write>(
    w: &mut W,
    project: &Project,
    team: &[&User],
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{}: {}",
        colorize_id(project.id.as_str(), config),
        project.name
    )?;
    writeln!(
        w,
        "{}  {}    {}  {}",
        dimmed("Type:", config),
        project.project_type(),
        dimmed("Budget:", config),
        format_budget(project.budget)
    )?;
    let attribute_label = match project.project_type() {
        ProjectType::Software => "Language:",
        ProjectType::Hardware => "Hardware:",
    };
    writeln!(
        w,
        "{}  {}",
        dimmed(attribute_label, config),
        project.details.attribute()
    )?;
    if !project.description.is_empty() {
        writeln!(w, "{}  {}", dimmed("Description:", config), project.description)?;
    }
    writeln!(
        w,
        "{}  {}/{}",
        dimmed("Team:", config),
        team.len(),
        project.team_size
    )?;
    for user in team {
        writeln!(
            w,
            "  {} {} <{}>",
            colorize_id(user.id.as_str(), config),
            user.name,
            user.email
        )?;
    }
    Ok(())
}

/// Write one line per project
pub fn write_projects<W: Write>(
    w: &mut W,
    projects: &[&Project],
    config: &OutputConfig,
) -> io::Result<()> {
    if projects.is_empty() {
        return writeln!(w, "No projects found.");
    }
    for project in projects {
        writeln!(
            w,
            "{}  {:<24}  {:<8}  {:>4}  {:>12}",
            colorize_id(&format!("{:<6}", project.id.as_str()), config),
            project.name,
            project.project_type().to_string(),
            project.team_size,
            format_budget(project.budget)
        )?;
    }
    Ok(())
}

/// Write full details of one task
pub fn write_task<W: Write>(w: &mut W, task: &Task, config: &OutputConfig) -> io::Result<()> {
    writeln!(w, "{}: {}", colorize_id(task.id.as_str(), config), task.name)?;
    writeln!(
        w,
        "{}  {}    {}  {}",
        dimmed("Status:", config),
        colorize_status(task.status, config),
        dimmed("Project:", config),
        task.project_id
    )?;
    writeln!(
        w,
        "{}  {}",
        dimmed("Assignee:", config),
        task.assigned_user_id
            .as_ref()
            .map_or_else(|| dimmed("unassigned", config), ToString::to_string)
    )
}

/// Write one line per task, optionally followed by a completion line
pub fn write_tasks<W: Write>(
    w: &mut W,
    tasks: &[&Task],
    completion: Option<f64>,
    config: &OutputConfig,
) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(w, "No tasks found.");
    }
    for task in tasks {
        writeln!(
            w,
            "{}  {:<28}  {}  {:<6}  {}",
            colorize_id(&format!("{:<6}", task.id.as_str()), config),
            task.name,
            colorize_status(task.status, config),
            task.project_id.as_str(),
            task.assigned_user_id
                .as_ref()
                .map_or("-", |id| id.as_str())
        )?;
    }
    if let Some(rate) = completion {
        writeln!(w, "{} {rate:.2}%", dimmed("Completion:", config))?;
    }
    Ok(())
}

/// Write full details of one user
pub fn write_user<W: Write>(w: &mut W, user: &User, config: &OutputConfig) -> io::Result<()> {
    writeln!(
        w,
        "{}: {} <{}> ({})",
        colorize_id(user.id.as_str(), config),
        user.name,
        user.email,
        colorize_role(user.role, config)
    )
}

/// Write one line per user
pub fn write_users<W: Write>(w: &mut W, users: &[&User], config: &OutputConfig) -> io::Result<()> {
    if users.is_empty() {
        return writeln!(w, "No users found.");
    }
    for user in users {
        writeln!(
            w,
            "{}  {:<20}  {:<28}  {}",
            colorize_id(&format!("{:<6}", user.id.as_str()), config),
            user.name,
            user.email,
            colorize_role(user.role, config)
        )?;
    }
    Ok(())
}

/// Write the project status report
pub fn write_report<W: Write>(
    w: &mut W,
    report: &[ProjectStatus],
    overall: f64,
    config: &OutputConfig,
) -> io::Result<()> {
    if report.is_empty() {
        return writeln!(w, "No report data.");
    }
    write_title(w, "Project Status Report", config)?;
    for row in report {
        writeln!(
            w,
            "{}  {:<24}  {:>3} tasks  {:>3} completed  {:>6.2}%",
            colorize_id(&format!("{:<6}", row.project_id.as_str()), config),
            row.name,
            row.total,
            row.completed,
            row.completion()
        )?;
    }
    writeln!(w)?;
    writeln!(w, "{} {overall:.2}%", bold("Overall completion:", config))
}

fn format_budget(budget: f64) -> String {
    format!("${budget:.2}")
}
