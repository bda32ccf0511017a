//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! shell input at parse time, providing immediate feedback for invalid values.
//! Rules that also apply to library callers delegate to [`crate::validation`]
//! and [`crate::id_generation`] so there is a single source of truth.

use crate::domain::{EntityKind, MAX_NAME_LENGTH};
use crate::id_generation;
use crate::validation;

/// Validate a project identifier (`P` followed by digits).
pub fn validate_project_id(s: &str) -> Result<String, String> {
    validate_entity_id(s, EntityKind::Project)
}

/// Validate a task identifier (`T` followed by digits).
pub fn validate_task_id(s: &str) -> Result<String, String> {
    validate_entity_id(s, EntityKind::Task)
}

/// Validate a user identifier (`U` followed by digits).
pub fn validate_user_id(s: &str) -> Result<String, String> {
    validate_entity_id(s, EntityKind::User)
}

fn validate_entity_id(s: &str, kind: EntityKind) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(format!("{} ID cannot be empty", capitalized(kind)));
    }
    let index = id_generation::parse_index(s, kind)
        .map_err(|e| format!("{e}. Expected format: {}0000", kind.prefix()))?;
    Ok(id_generation::format_id(kind, index).to_string())
}

/// Validate an entity name: non-blank, at most [`MAX_NAME_LENGTH`] characters.
pub fn validate_name(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if s.len() > MAX_NAME_LENGTH {
        return Err(format!(
            "Name cannot exceed {MAX_NAME_LENGTH} characters (got {})",
            s.len()
        ));
    }

    Ok(s.to_string())
}

/// Validate an email address shape.
pub fn validate_email(s: &str) -> Result<String, String> {
    let s = s.trim();
    if !validation::validate_email(s) {
        return Err(format!(
            "Invalid email address: '{s}'. Expected format: name@domain.tld"
        ));
    }
    Ok(s.to_string())
}

/// Validate a budget: a finite, non-negative number.
pub fn validate_budget(s: &str) -> Result<f64, String> {
    let budget: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid budget: '{}' is not a number", s.trim()))?;
    if !validation::validate_budget(budget) {
        return Err("Budget must be a non-negative number".to_string());
    }
    Ok(budget)
}

/// Validate a team size: a positive whole number.
pub fn validate_team_size(s: &str) -> Result<usize, String> {
    let size: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid team size: '{}' is not a whole number", s.trim()))?;
    if !validation::validate_team_size(size) {
        return Err("Team size must be greater than zero".to_string());
    }
    Ok(size)
}

fn capitalized(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Project => "Project",
        EntityKind::Task => "Task",
        EntityKind::User => "User",
    }
}
