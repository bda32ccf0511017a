//! CLI value enums and domain type conversions.
//!
//! This module contains the value enums used for shell argument parsing
//! and their conversions to domain types.

use clap::ValueEnum;

use crate::domain::{ProjectType, TaskStatus, UserRole};

// ============================================================================
// Value Enums
// ============================================================================

/// Project type for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectTypeArg {
    /// Software project (takes a language)
    Software,
    /// Hardware project (takes a hardware type)
    Hardware,
}

impl std::fmt::Display for ProjectTypeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&ProjectType::from(*self), f)
    }
}

/// Task status for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatusArg {
    /// Not started
    Pending,
    /// Currently being worked on
    #[value(name = "in_progress", alias = "in-progress")]
    InProgress,
    /// Done
    Completed,
}

impl std::fmt::Display for TaskStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&TaskStatus::from(*self), f)
    }
}

/// User role for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRoleArg {
    /// Regular user
    #[default]
    Regular,
    /// Administrator
    Admin,
}

impl std::fmt::Display for UserRoleArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&UserRole::from(*self), f)
    }
}

// ============================================================================
// Type Conversions: CLI Args -> Domain Types
// ============================================================================

impl From<ProjectTypeArg> for ProjectType {
    fn from(arg: ProjectTypeArg) -> Self {
        match arg {
            ProjectTypeArg::Software => ProjectType::Software,
            ProjectTypeArg::Hardware => ProjectType::Hardware,
        }
    }
}

impl From<TaskStatusArg> for TaskStatus {
    fn from(arg: TaskStatusArg) -> Self {
        match arg {
            TaskStatusArg::Pending => TaskStatus::Pending,
            TaskStatusArg::InProgress => TaskStatus::InProgress,
            TaskStatusArg::Completed => TaskStatus::Completed,
        }
    }
}

impl From<UserRoleArg> for UserRole {
    fn from(arg: UserRoleArg) -> Self {
        match arg {
            UserRoleArg::Regular => UserRole::Regular,
            UserRoleArg::Admin => UserRole::Admin,
        }
    }
}
