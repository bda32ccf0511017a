//! Color and styling helpers for shell output.
//!
//! Semantic Color Theme:
//!   - Success/Done:   green   (completed tasks, confirmations)
//!   - Warning/Active: yellow  (in-progress tasks, admin role)
//!   - Error:          red     (failed commands)
//!   - Info/Reference: cyan    (entity IDs)
//!   - Muted:          dimmed  (field labels, empty values)
//!   - Emphasis:       bold    (section headers)

use crate::domain::{TaskStatus, UserRole};
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Apply color to status text based on task status.
pub(crate) fn colorize_status(status: TaskStatus, config: &OutputConfig) -> String {
    let text = status.to_string();
    if !config.use_colors {
        return text;
    }
    match status {
        TaskStatus::Pending => text.white().to_string(),
        TaskStatus::InProgress => text.yellow().to_string(),
        TaskStatus::Completed => text.green().to_string(),
    }
}

/// Admins stand out in yellow.
pub(crate) fn colorize_role(role: UserRole, config: &OutputConfig) -> String {
    let text = role.to_string();
    if !config.use_colors {
        return text;
    }
    match role {
        UserRole::Admin => text.yellow().to_string(),
        UserRole::Regular => text,
    }
}

/// Colorize an entity ID (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    info(id, config)
}

/// Apply dimmed style to text (for labels/field names).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_color() -> OutputConfig {
        OutputConfig { use_colors: false }
    }

    #[test]
    fn test_plain_when_colors_disabled() {
        let config = no_color();
        assert_eq!(success("ok", &config), "ok");
        assert_eq!(error("bad", &config), "bad");
        assert_eq!(colorize_status(TaskStatus::InProgress, &config), "In Progress");
        assert_eq!(colorize_role(UserRole::Admin, &config), "Admin");
        assert_eq!(colorize_id("P0000", &config), "P0000");
    }

    #[test]
    fn test_colored_output_contains_text() {
        colored::control::set_override(true);
        let config = OutputConfig { use_colors: true };
        let painted = colorize_status(TaskStatus::Completed, &config);
        colored::control::unset_override();

        assert!(painted.contains("Completed"));
        assert_ne!(painted, "Completed");
    }
}
