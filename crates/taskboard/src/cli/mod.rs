//! CLI argument parsing and the interactive shell.
//!
//! The binary takes a handful of process flags and then reads shell commands,
//! one per line, from stdin or a script file. Each line is parsed with clap's
//! derive API (see [`ShellCommand`]).
//!
//! # Shell commands
//!
//! - `project add|list|show|delete|type|budget|set-budget|assign|unassign|members`
//! - `task add|list|show|status|assign|delete|project|user|completion`
//! - `user add|list|show|role|email|delete`
//! - `login`, `logout`, `whoami`, `report`, `help`, `quit`/`exit`
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! taskboard --seed <<'EOF'
//! user add "Ada Admin" --email ada@example.com --role admin
//! task add "Train model" --project P0000 --assignee U0000
//! task status T0000 completed
//! report
//! EOF
//! ```

mod args;
mod execute;
mod tokenize;
mod types;
mod validators;

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

pub use args::{
    ProjectAddArgs, ProjectCommand, ShellCommand, ShellLine, TaskAddArgs, TaskCommand,
    UserAddArgs, UserCommand,
};
pub use execute::{Flow, RunSummary, Shell};
pub use tokenize::{TokenizeError, tokenize};
pub use types::{ProjectTypeArg, TaskStatusArg, UserRoleArg};
pub use validators::{
    validate_budget, validate_email, validate_name, validate_project_id, validate_task_id,
    validate_team_size, validate_user_id,
};

use crate::app::Workspace;
use crate::config::Config;
use crate::output::{OutputConfig, OutputMode};

/// Taskboard - in-memory project, task and user management
///
/// Starts a shell that reads commands from stdin (or `--script`). Type `help`
/// at the prompt for the command list.
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./taskboard.yaml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start with the sample projects loaded
    #[arg(long)]
    pub seed: bool,

    /// Read commands from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Output mode selected by the flags
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }

    /// Build the workspace described by the flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or seeding fails.
    pub fn workspace(&self) -> Result<Workspace> {
        let cwd = std::env::current_dir().context("Failed to read working directory")?;
        let config = Config::load_or_default(self.config.as_deref(), &cwd)?;
        let mut workspace = Workspace::from_config(&config);
        if self.seed {
            workspace.seed_sample_data()?;
        }
        Ok(workspace)
    }

    /// Run the shell to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if setup fails or input/output breaks; individual
    /// command failures are reported by the shell and do not abort the run.
    pub fn execute(&self) -> Result<RunSummary> {
        let workspace = self.workspace()?;
        let stdout = io::stdout();
        let mut shell = Shell::new(
            workspace,
            stdout.lock(),
            self.output_mode(),
            OutputConfig::from_env(),
        );

        match &self.script {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open script {}", path.display()))?;
                shell.run(BufReader::new(file), false)
            }
            None => {
                let stdin = io::stdin();
                let prompt = stdin.is_terminal() && !self.json;
                shell.run(stdin.lock(), prompt)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== CLI Parsing Tests ==========

    #[test]
    fn test_parse_no_flags() {
        let cli = Cli::try_parse_from(["taskboard"]).unwrap();
        assert!(!cli.json);
        assert!(!cli.seed);
        assert!(cli.config.is_none());
        assert!(cli.script.is_none());
        assert_eq!(cli.output_mode(), OutputMode::Text);
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "taskboard",
            "--json",
            "--seed",
            "--config",
            "board.yaml",
            "--script",
            "cmds.txt",
        ])
        .unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Json);
        assert!(cli.seed);
        assert_eq!(cli.config, Some(PathBuf::from("board.yaml")));
        assert_eq!(cli.script, Some(PathBuf::from("cmds.txt")));
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert!(Cli::try_parse_from(["taskboard", "--verbose-mode"]).is_err());
    }

    // ========== Shell Grammar Tests ==========

    fn parse_line(line: &str) -> std::result::Result<ShellCommand, clap::Error> {
        ShellLine::try_parse_from(tokenize(line).unwrap()).map(|l| l.command)
    }

    #[test]
    fn test_parse_project_add_full() {
        let command = parse_line(
            r#"project add "IoT Device" -t hardware -a Microcontroller -s 3 -b 1500 -D "Smart sensor""#,
        )
        .unwrap();
        match command {
            ShellCommand::Project(ProjectCommand::Add(args)) => {
                assert_eq!(args.name, "IoT Device");
                assert_eq!(args.project_type, ProjectTypeArg::Hardware);
                assert_eq!(args.attribute, "Microcontroller");
                assert_eq!(args.team_size, 3);
                assert!((args.budget - 1500.0).abs() < f64::EPSILON);
                assert_eq!(args.description, "Smart sensor");
            }
            other => panic!("Expected project add, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_project_add_rejects_zero_team() {
        assert!(parse_line("project add X -t software -a Rust -s 0").is_err());
    }

    #[test]
    fn test_parse_task_add_defaults() {
        match parse_line("task add Build --project P0001").unwrap() {
            ShellCommand::Task(TaskCommand::Add(args)) => {
                assert_eq!(args.status, TaskStatusArg::Pending);
                assert_eq!(args.project, "P0001");
                assert!(args.assignee.is_none());
            }
            other => panic!("Expected task add, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_task_status_spellings() {
        for spelling in ["in_progress", "in-progress", "IN_PROGRESS"] {
            match parse_line(&format!("task status T0000 {spelling}")).unwrap() {
                ShellCommand::Task(TaskCommand::Status { status, .. }) => {
                    assert_eq!(status, TaskStatusArg::InProgress);
                }
                other => panic!("Expected task status, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_task_assign_without_user_clears() {
        match parse_line("task assign T0002").unwrap() {
            ShellCommand::Task(TaskCommand::Assign { task_id, user_id }) => {
                assert_eq!(task_id, "T0002");
                assert!(user_id.is_none());
            }
            other => panic!("Expected task assign, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_user_add_role_default() {
        match parse_line("user add Bob -e bob@example.com").unwrap() {
            ShellCommand::User(UserCommand::Add(args)) => {
                assert_eq!(args.role, UserRoleArg::Regular);
            }
            other => panic!("Expected user add, got {other:?}"),
        }
        assert!(parse_line("user add Bob -e not-an-email").is_err());
    }

    #[test]
    fn test_parse_ids_checked_per_kind() {
        assert!(parse_line("project show T0001").is_err());
        assert!(parse_line("task show P0001").is_err());
        assert!(parse_line("login P0001").is_err());
        assert!(parse_line("login U0001").is_ok());
    }

    #[test]
    fn test_parse_session_and_report() {
        assert!(matches!(parse_line("whoami").unwrap(), ShellCommand::Whoami));
        assert!(matches!(parse_line("logout").unwrap(), ShellCommand::Logout));
        assert!(matches!(parse_line("report").unwrap(), ShellCommand::Report));
        assert!(matches!(parse_line("exit").unwrap(), ShellCommand::Quit));
    }
}
