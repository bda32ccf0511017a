//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use taskboard::domain::{
    EntityId, NewProject, NewTask, NewUser, ProjectDetails, TaskStatus, UserRole,
};

/// Run the taskboard binary in `dir`, feeding `script` on stdin
pub fn run_taskboard_in_dir(dir: &Path, args: &[&str], script: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_taskboard"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start taskboard");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(script.as_bytes())
        .expect("Failed to write script");

    child.wait_with_output().expect("Failed to wait for taskboard")
}

/// Stdout of a finished run as a string
pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A software project with the given team size
pub fn software_project(name: &str, team_size: usize, budget: f64) -> NewProject {
    NewProject {
        name: name.to_string(),
        description: format!("{name} description"),
        details: ProjectDetails::Software {
            language: "Rust".to_string(),
        },
        team_size,
        budget,
    }
}

/// A hardware project with the given team size
pub fn hardware_project(name: &str, team_size: usize, budget: f64) -> NewProject {
    NewProject {
        name: name.to_string(),
        description: format!("{name} description"),
        details: ProjectDetails::Hardware {
            hardware_type: "Microcontroller".to_string(),
        },
        team_size,
        budget,
    }
}

/// A user with an email derived from the name
pub fn new_user(name: &str, role: UserRole) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role,
    }
}

/// An unassigned task in `project_id`
pub fn new_task(name: &str, project_id: &EntityId, status: TaskStatus) -> NewTask {
    NewTask {
        name: name.to_string(),
        status,
        project_id: project_id.clone(),
        assigned_user_id: None,
    }
}
