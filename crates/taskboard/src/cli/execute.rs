//! Command execution logic.
//!
//! [`Shell`] owns a [`Workspace`] and an output sink. Each input line is
//! tokenized, parsed with clap and dispatched; failures are reported on the
//! sink and the shell keeps going.

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use serde_json::json;
use tracing::{debug, info};

use super::args::{
    ProjectAddArgs, ProjectCommand, ShellCommand, ShellLine, TaskAddArgs, TaskCommand,
    UserAddArgs, UserCommand,
};
use super::tokenize::tokenize;
use crate::app::Workspace;
use crate::domain::{
    EntityId, NewProject, NewTask, NewUser, Project, ProjectDetails, ProjectType, Task, User,
    UserRole,
};
use crate::output::{self, OutputConfig, OutputMode};
use crate::service::overall_completion;

/// What the shell loop should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line
    Continue,
    /// Stop reading
    Quit,
}

/// Outcome counters for a shell run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines that executed successfully
    pub succeeded: usize,
    /// Lines that failed to parse or execute
    pub failed: usize,
}

/// Line-oriented command interpreter.
pub struct Shell<W: Write> {
    workspace: Workspace,
    out: W,
    mode: OutputMode,
    config: OutputConfig,
}

impl<W: Write> std::fmt::Debug for Shell<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("workspace", &self.workspace)
            .field("mode", &self.mode)
            .field("config", &self.config)
            .field("out", &"<dyn Write>")
            .finish()
    }
}

impl<W: Write> Shell<W> {
    /// Create a shell writing to `out`
    pub fn new(workspace: Workspace, out: W, mode: OutputMode, config: OutputConfig) -> Self {
        Self {
            workspace,
            out,
            mode,
            config,
        }
    }

    /// The workspace being driven
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Consume the shell, returning the output sink
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run every line from `input` until end of input or `quit`.
    ///
    /// When `prompt` is set, a prompt is written before each line.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails;
    /// command failures are reported and counted.
    pub fn run<R: BufRead>(&mut self, input: R, prompt: bool) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(self.out, "taskboard> ")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else { break };
            let line = line?;
            match self.run_line(&line)? {
                (Flow::Quit, _) => break,
                (Flow::Continue, Some(true)) => summary.succeeded += 1,
                (Flow::Continue, Some(false)) => summary.failed += 1,
                (Flow::Continue, None) => {}
            }
        }
        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Shell finished"
        );
        Ok(summary)
    }

    /// Execute one line.
    ///
    /// Returns the flow and whether a command ran successfully (`None` for
    /// blank lines and comments).
    ///
    /// # Errors
    ///
    /// Returns an error only if writing output fails.
    pub fn run_line(&mut self, line: &str) -> Result<(Flow, Option<bool>)> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok((Flow::Continue, None));
        }

        let tokens = match tokenize(trimmed) {
            Ok(tokens) => tokens,
            Err(e) => {
                self.report_error(&e.to_string())?;
                return Ok((Flow::Continue, Some(false)));
            }
        };

        let parsed = match ShellLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                write!(self.out, "{}", e.render())?;
                return Ok((Flow::Continue, Some(true)));
            }
            Err(e) => {
                write!(self.out, "{}", e.render())?;
                return Ok((Flow::Continue, Some(false)));
            }
        };

        debug!(command = ?parsed.command, "Dispatching command");
        if matches!(parsed.command, ShellCommand::Quit) {
            return Ok((Flow::Quit, None));
        }

        match self.execute(parsed.command) {
            Ok(()) => Ok((Flow::Continue, Some(true))),
            Err(e) => {
                // Output failures are fatal; domain failures are reported
                if let Some(io_err) = e.downcast_ref::<std::io::Error>() {
                    return Err(anyhow::anyhow!("Failed to write output: {io_err}"));
                }
                self.report_error(&e.to_string())?;
                Ok((Flow::Continue, Some(false)))
            }
        }
    }

    fn report_error(&mut self, message: &str) -> Result<()> {
        match self.mode {
            OutputMode::Json => output::write_json(&mut self.out, &json!({ "error": message }))?,
            OutputMode::Text => writeln!(
                self.out,
                "{} {message}",
                output::error("Error:", &self.config)
            )?,
        }
        Ok(())
    }

    fn confirm(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", output::success(message, &self.config))?;
        Ok(())
    }

    fn execute(&mut self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Project(cmd) => self.execute_project(cmd),
            ShellCommand::Task(cmd) => self.execute_task(cmd),
            ShellCommand::User(cmd) => self.execute_user(cmd),
            ShellCommand::Login { user_id } => {
                let user = self.workspace.login(&user_id)?;
                match self.mode {
                    OutputMode::Json => output::write_json(&mut self.out, &user)?,
                    OutputMode::Text => {
                        self.confirm(&format!("Logged in as {} ({})", user.name, user.role))?;
                    }
                }
                Ok(())
            }
            ShellCommand::Logout => {
                let previous = self.workspace.logout();
                match self.mode {
                    OutputMode::Json => {
                        output::write_json(&mut self.out, &json!({ "logged_out": previous }))?;
                    }
                    OutputMode::Text if previous.is_some() => {
                        self.confirm("Logged out successfully.")?;
                    }
                    OutputMode::Text => writeln!(
                        self.out,
                        "{}",
                        output::warning("Nobody is logged in.", &self.config)
                    )?,
                }
                Ok(())
            }
            ShellCommand::Whoami => {
                let current = self.workspace.current_user();
                match (self.mode, current) {
                    (OutputMode::Json, user) => output::write_json(&mut self.out, &user)?,
                    (OutputMode::Text, Some(user)) => {
                        output::write_user(&mut self.out, user, &self.config)?;
                    }
                    (OutputMode::Text, None) => writeln!(
                        self.out,
                        "{}",
                        output::warning("Nobody is logged in.", &self.config)
                    )?,
                }
                Ok(())
            }
            ShellCommand::Report => {
                let report = self.workspace.report();
                let overall = overall_completion(&report);
                match self.mode {
                    OutputMode::Json => output::write_json(
                        &mut self.out,
                        &json!({ "projects": report, "overall_completion": overall }),
                    )?,
                    OutputMode::Text => {
                        output::write_report(&mut self.out, &report, overall, &self.config)?;
                    }
                }
                Ok(())
            }
            ShellCommand::Quit => Ok(()),
        }
    }

    // ========== Projects ==========

    fn execute_project(&mut self, command: ProjectCommand) -> Result<()> {
        match command {
            ProjectCommand::Add(args) => self.project_add(args),
            ProjectCommand::List => {
                let projects = self.workspace.projects().require_all()?;
                match self.mode {
                    OutputMode::Json => output::write_json(&mut self.out, &projects)?,
                    OutputMode::Text => {
                        output::write_projects(&mut self.out, &projects, &self.config)?;
                    }
                }
                Ok(())
            }
            ProjectCommand::Show { project_id } => {
                let project = self.workspace.projects().get_by_id(&project_id)?;
                let team = self.workspace.members(&project_id)?;
                match self.mode {
                    OutputMode::Json => output::write_json(
                        &mut self.out,
                        &json!({ "project": project, "team": team }),
                    )?,
                    OutputMode::Text => {
                        output::write_project(&mut self.out, project, &team, &self.config)?;
                    }
                }
                Ok(())
            }
            ProjectCommand::Delete { project_id } => {
                let project = self.workspace.delete_project(&project_id)?;
                match self.mode {
                    OutputMode::Json => output::write_json(&mut self.out, &project)?,
                    OutputMode::Text => {
                        self.confirm(&format!("Deleted project {}: {}", project.id, project.name))?;
                    }
                }
                Ok(())
            }
            ProjectCommand::Type { project_type } => {
                let projects = self
                    .workspace
                    .projects()
                    .filter_by_type(&ProjectType::from(project_type).to_string())?;
                write_project_list(&mut self.out, self.mode, &self.config, &projects)
            }
            ProjectCommand::Budget { min, max } => {
                let projects = self
                    .workspace
                    .projects()
                    .filter_by_budget_range(min, max)?;
                write_project_list(&mut self.out, self.mode, &self.config, &projects)
            }
            ProjectCommand::SetBudget { project_id, budget } => {
                let project = self.workspace.update_budget(&project_id, budget)?;
                match self.mode {
                    OutputMode::Json => output::write_json(&mut self.out, &project)?,
                    OutputMode::Text => self.confirm(&format!(
                        "Project {} budget set to ${:.2}",
                        project.id, project.budget
                    ))?,
                }
                Ok(())
            }
            ProjectCommand::Assign {
                project_id,
                user_id,
            } => {
                self.workspace.assign_member(&project_id, &user_id)?;
                self.write_membership(&project_id, &user_id, true)
            }
            ProjectCommand::Unassign {
                project_id,
                user_id,
            } => {
                self.workspace.remove_member(&project_id, &user_id)?;
                self.write_membership(&project_id, &user_id, false)
            }
            ProjectCommand::Members { project_id } => {
                let team = self.workspace.members(&project_id)?;
                match self.mode {
                    OutputMode::Json => output::write_json(&mut self.out, &team)?,
                    OutputMode::Text => output::write_users(&mut self.out, &team, &self.config)?,
                }
                Ok(())
            }
        }
    }

    fn project_add(&mut self, args: ProjectAddArgs) -> Result<()> {
        let project = self.workspace.create_project(NewProject {
            name: args.name,
            description: args.description,
            details: ProjectDetails::for_type(args.project_type.into(), args.attribute),
            team_size: args.team_size,
            budget: args.budget,
        })?;
        match self.mode {
            OutputMode::Json => output::write_json(&mut self.out, &project)?,
            OutputMode::Text => {
                self.confirm(&format!("Created project {}: {}", project.id, project.name))?;
            }
        }
        Ok(())
    }

    fn write_membership(&mut self, project_id: &str, user_id: &str, added: bool) -> Result<()> {
        match self.mode {
            OutputMode::Json => output::write_json(
                &mut self.out,
                &json!({ "project_id": project_id, "user_id": user_id, "assigned": added }),
            )?,
            OutputMode::Text if added => {
                self.confirm(&format!("Assigned {user_id} to project {project_id}"))?;
            }
            OutputMode::Text => {
                self.confirm(&format!("Removed {user_id} from project {project_id}"))?;
            }
        }
        Ok(())
    }

    // ========== Tasks ==========

    fn execute_task(&mut self, command: TaskCommand) -> Result<()> {
        match command {
            TaskCommand::Add(args) => self.task_add(args),
            TaskCommand::List => {
                let tasks = self.workspace.tasks().require_all()?;
                write_task_list(&mut self.out, self.mode, &self.config, &tasks, None)
            }
            TaskCommand::Show { task_id } => {
                let task = self.workspace.tasks().get_by_id(&task_id)?;
                match self.mode {
                    OutputMode::Json => output::write_json(&mut self.out, task)?,
                    OutputMode::Text => output::write_task(&mut self.out, task, &self.config)?,
                }
                Ok(())
            }
            TaskCommand::Status { task_id, status } => {
                let task = self
                    .workspace
                    .update_task_status(&task_id, status.into())?;
                match self.mode {
                    OutputMode::Json => output::write_json(&mut self.out, &task)?,
                    OutputMode::Text => self.confirm(&format!(
                        "Task \"{}\" marked as {}",
                        task.name, task.status
                    ))?,
                }
                Ok(())
            }
            TaskCommand::Assign { task_id, user_id } => {
                let task = self.workspace.assign_task(&task_id, user_id.as_deref())?;
                match self.mode {
                    OutputMode::Json => output::write_json(&mut self.out, &task)?,
                    OutputMode::Text => match &task.assigned_user_id {
                        Some(user_id) => {
                            self.confirm(&format!("Task {} assigned to {user_id}", task.id))?;
                        }
                        None => self.confirm(&format!("Task {} is now unassigned", task.id))?,
                    },
                }
                Ok(())
            }
            TaskCommand::Delete { task_id } => {
                let task = self.workspace.delete_task(&task_id)?;
                match self.mode {
                    OutputMode::Json => output::write_json(&mut self.out, &task)?,
                    OutputMode::Text => {
                        self.confirm(&format!("Task {} has been removed", task.id))?;
                    }
                }
                Ok(())
            }
            TaskCommand::Project { project_id } => {
                let tasks = self.workspace.project_tasks(&project_id)?;
                let rate = self.workspace.completion_rate(&project_id)?;
                write_task_list(&mut self.out, self.mode, &self.config, &tasks, Some(rate))
            }
            TaskCommand::User { user_id } => {
                let tasks = self.workspace.tasks().tasks_for_user(&user_id)?;
                write_task_list(&mut self.out, self.mode, &self.config, &tasks, None)
            }
            TaskCommand::Completion { project_id } => {
                let rate = self.workspace.completion_rate(&project_id)?;
                match self.mode {
                    OutputMode::Json => output::write_json(
                        &mut self.out,
                        &json!({ "project_id": project_id, "completion": rate }),
                    )?,
                    OutputMode::Text => {
                        writeln!(self.out, "Project {project_id}: {rate:.2}% completed")?;
                    }
                }
                Ok(())
            }
        }
    }

    fn task_add(&mut self, args: TaskAddArgs) -> Result<()> {
        let task = self.workspace.create_task(NewTask {
            name: args.name,
            status: args.status.into(),
            project_id: EntityId::new(args.project),
            assigned_user_id: args.assignee.map(EntityId::new),
        })?;
        match self.mode {
            OutputMode::Json => output::write_json(&mut self.out, &task)?,
            OutputMode::Text => self.confirm(&format!(
                "Task \"{}\" added to project {} as {}",
                task.name, task.project_id, task.id
            ))?,
        }
        Ok(())
    }

    // ========== Users ==========

    fn execute_user(&mut self, command: UserCommand) -> Result<()> {
        match command {
            UserCommand::Add(args) => self.user_add(args),
            UserCommand::List => {
                let users = self.workspace.users().require_all()?;
                write_user_list(&mut self.out, self.mode, &self.config, &users)
            }
            UserCommand::Show { user_id } => {
                let user = self.workspace.users().get_by_id(&user_id)?;
                match self.mode {
                    OutputMode::Json => output::write_json(&mut self.out, user)?,
                    OutputMode::Text => output::write_user(&mut self.out, user, &self.config)?,
                }
                Ok(())
            }
            UserCommand::Role { role } => {
                let role = UserRole::from(role).to_string();
                let users = self.workspace.users().filter_by_role(&role)?;
                write_user_list(&mut self.out, self.mode, &self.config, &users)
            }
            UserCommand::Email { user_id, email } => {
                let user = self.workspace.update_email(&user_id, &email)?;
                match self.mode {
                    OutputMode::Json => output::write_json(&mut self.out, &user)?,
                    OutputMode::Text => {
                        self.confirm(&format!("User {} email set to {}", user.id, user.email))?;
                    }
                }
                Ok(())
            }
            UserCommand::Delete { user_id } => {
                let user = self.workspace.delete_user(&user_id)?;
                match self.mode {
                    OutputMode::Json => output::write_json(&mut self.out, &user)?,
                    OutputMode::Text => {
                        self.confirm(&format!("Deleted user {}: {}", user.id, user.name))?;
                    }
                }
                Ok(())
            }
        }
    }

    fn user_add(&mut self, args: UserAddArgs) -> Result<()> {
        let user = self.workspace.sign_up(NewUser {
            name: args.name,
            email: args.email,
            role: args.role.into(),
        })?;
        match self.mode {
            OutputMode::Json => output::write_json(&mut self.out, &user)?,
            OutputMode::Text => {
                self.confirm(&format!("Created user {}: {}", user.id, user.name))?;
                writeln!(self.out, "You have been automatically logged in.")?;
            }
        }
        Ok(())
    }
}

fn write_project_list<W: Write>(
    out: &mut W,
    mode: OutputMode,
    config: &OutputConfig,
    projects: &[&Project],
) -> Result<()> {
    match mode {
        OutputMode::Json => output::write_json(out, projects)?,
        OutputMode::Text => output::write_projects(out, projects, config)?,
    }
    Ok(())
}

fn write_task_list<W: Write>(
    out: &mut W,
    mode: OutputMode,
    config: &OutputConfig,
    tasks: &[&Task],
    completion: Option<f64>,
) -> Result<()> {
    match (mode, completion) {
        (OutputMode::Json, Some(rate)) => {
            output::write_json(out, &json!({ "tasks": tasks, "completion": rate }))?;
        }
        (OutputMode::Json, None) => output::write_json(out, tasks)?,
        (OutputMode::Text, _) => output::write_tasks(out, tasks, completion, config)?,
    }
    Ok(())
}

fn write_user_list<W: Write>(
    out: &mut W,
    mode: OutputMode,
    config: &OutputConfig,
    users: &[&User],
) -> Result<()> {
    match mode {
        OutputMode::Json => output::write_json(out, users)?,
        OutputMode::Text => output::write_users(out, users, config)?,
    }
    Ok(())
}
