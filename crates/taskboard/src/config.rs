//! Configuration management for taskboard.
//!
//! Configuration is an optional YAML file holding initial store capacities:
//!
//! ```yaml
//! capacities:
//!   projects: 10
//!   tasks: 50
//!   users: 20
//!   assignments: 10
//! ```
//!
//! Missing fields take their defaults; an absent file means all defaults.

use crate::assignment::DEFAULT_ASSIGNMENT_CAPACITY;
use crate::domain::EntityKind;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "taskboard.yaml";

/// Configuration file structure for taskboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Initial slot counts for each store
    #[serde(default)]
    pub capacities: Capacities,
}

/// Initial capacities of the stores and the assignment table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Capacities {
    /// Project slots
    pub projects: usize,
    /// Task slots
    pub tasks: usize,
    /// User slots
    pub users: usize,
    /// Assignment rows
    pub assignments: usize,
}

impl Default for Capacities {
    fn default() -> Self {
        Self {
            projects: EntityKind::Project.default_capacity(),
            tasks: EntityKind::Task.default_capacity(),
            users: EntityKind::User.default_capacity(),
            assignments: DEFAULT_ASSIGNMENT_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// - `Error::Io` if the file cannot be read
    /// - `Error::Config` if it is not valid YAML for this structure
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), capacities = ?config.capacities, "Loaded configuration");
        Ok(config)
    }

    /// Load from `explicit` if given, else from [`CONFIG_FILE_NAME`] in `dir`
    /// if it exists, else defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`]; an explicit path that does not exist is an
    /// error, a missing default file is not.
    pub fn load_or_default(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Serialize to YAML
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_match_entity_kinds() {
        let capacities = Capacities::default();
        assert_eq!(capacities.projects, 10);
        assert_eq!(capacities.tasks, 50);
        assert_eq!(capacities.users, 20);
        assert_eq!(capacities.assignments, 10);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "custom.yaml", "capacities:\n  tasks: 4\n");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.capacities.tasks, 4);
        assert_eq!(config.capacities.projects, 10);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(None, dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_finds_working_directory_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, CONFIG_FILE_NAME, "capacities:\n  users: 3\n");

        let config = Config::load_or_default(None, dir.path()).unwrap();
        assert_eq!(config.capacities.users, 3);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            Config::load_or_default(Some(&missing), dir.path()),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.yaml", "capacities:\n  tasks: lots\n");
        assert!(matches!(Config::load(&path), Err(Error::Config(_))));

        let path = write(&dir, "unknown.yaml", "capacity: {}\n");
        assert!(matches!(Config::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = Config {
            capacities: Capacities {
                projects: 1,
                tasks: 2,
                users: 3,
                assignments: 4,
            },
        };
        let yaml = config.to_yaml().unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
