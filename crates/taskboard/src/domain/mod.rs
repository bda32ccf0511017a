//! Domain types for project, task and user management.
//!
//! This module contains the entity records held by the indexed stores and the
//! input structs used to create them.

use crate::error::{Error, Result};
use crate::validation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length for entity names
pub const MAX_NAME_LENGTH: usize = 120;

/// Kind of entity an identifier belongs to.
///
/// Each kind carries its own identifier prefix and default store capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Projects (`P0000`)
    Project,

    /// Tasks (`T0000`)
    Task,

    /// Users (`U0000`)
    User,
}

impl EntityKind {
    /// Identifier prefix for this kind
    pub fn prefix(self) -> char {
        match self {
            Self::Project => 'P',
            Self::Task => 'T',
            Self::User => 'U',
        }
    }

    /// Initial slot count used when no capacity is configured
    pub fn default_capacity(self) -> usize {
        match self {
            Self::Project => 10,
            Self::Task => 50,
            Self::User => 20,
        }
    }

    /// Lowercase name used in messages ("project", "task", "user")
    pub fn name(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Task => "task",
            Self::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Externally visible identifier of an entity (e.g. `P0004`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create a new entity ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier carries no text at all
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Anything that can live in a store slot.
///
/// Records are keyed by the identifier they carry; a record with a blank
/// identifier is treated as empty and rejected by the store.
pub trait Record {
    /// Identifier carried by the record
    fn id(&self) -> &EntityId;
}

// ========== Projects ==========

/// Broad category of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectType {
    /// Software project
    Software,

    /// Hardware project
    Hardware,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Software => write!(f, "Software"),
            Self::Hardware => write!(f, "Hardware"),
        }
    }
}

impl FromStr for ProjectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "software" => Ok(Self::Software),
            "hardware" => Ok(Self::Hardware),
            _ => Err(Error::invalid(
                "type",
                format!("'{}' is not one of Software, Hardware", s.trim()),
            )),
        }
    }
}

/// Type-specific project attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProjectDetails {
    /// Software project with its implementation language
    Software {
        /// Programming language
        language: String,
    },

    /// Hardware project with its hardware category
    Hardware {
        /// Hardware category (e.g. "Microcontroller")
        hardware_type: String,
    },
}

impl ProjectDetails {
    /// The project type these details describe
    pub fn project_type(&self) -> ProjectType {
        match self {
            Self::Software { .. } => ProjectType::Software,
            Self::Hardware { .. } => ProjectType::Hardware,
        }
    }

    /// The type-specific attribute value (language or hardware type)
    pub fn attribute(&self) -> &str {
        match self {
            Self::Software { language } => language,
            Self::Hardware { hardware_type } => hardware_type,
        }
    }

    /// Build details for `project_type` from the single type-specific attribute
    pub fn for_type(project_type: ProjectType, attribute: impl Into<String>) -> Self {
        match project_type {
            ProjectType::Software => Self::Software {
                language: attribute.into(),
            },
            ProjectType::Hardware => Self::Hardware {
                hardware_type: attribute.into(),
            },
        }
    }
}

/// A project in the tracking system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier for the project
    pub id: EntityId,

    /// Project name
    pub name: String,

    /// Project description
    pub description: String,

    /// Type-specific attributes
    #[serde(flatten)]
    pub details: ProjectDetails,

    /// Maximum number of users that can be assigned at once
    pub team_size: usize,

    /// Budget (non-negative)
    pub budget: f64,
}

impl Project {
    /// The project's type
    pub fn project_type(&self) -> ProjectType {
        self.details.project_type()
    }
}

impl Record for Project {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Data for creating a new project
#[derive(Debug, Clone)]
pub struct NewProject {
    /// Project name
    pub name: String,

    /// Project description
    pub description: String,

    /// Type-specific attributes
    pub details: ProjectDetails,

    /// Team size capacity (must be positive)
    pub team_size: usize,

    /// Budget (must be non-negative)
    pub budget: f64,
}

impl NewProject {
    /// Validate the new project data.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        if !validation::validate_team_size(self.team_size) {
            return Err(Error::invalid("team_size", "must be greater than zero"));
        }
        if !validation::validate_budget(self.budget) {
            return Err(Error::invalid("budget", "must be a non-negative number"));
        }
        if !validation::has_text(self.details.attribute()) {
            let field = match self.details {
                ProjectDetails::Software { .. } => "language",
                ProjectDetails::Hardware { .. } => "hardware_type",
            };
            return Err(Error::invalid(field, "cannot be empty"));
        }
        Ok(())
    }

    /// Attach an identifier, producing the stored record
    pub(crate) fn into_project(self, id: EntityId) -> Project {
        Project {
            id,
            name: self.name.trim().to_string(),
            description: self.description,
            details: self.details,
            team_size: self.team_size,
            budget: self.budget,
        }
    }
}

// ========== Tasks ==========

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started
    Pending,

    /// Currently being worked on
    #[serde(rename = "In Progress")]
    InProgress,

    /// Done
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    /// Parse a status ignoring case; `in_progress` and `in-progress` are
    /// accepted as spellings of "In Progress".
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(Error::invalid(
                "status",
                format!(
                    "'{}' is not one of Pending, In Progress, Completed",
                    s.trim()
                ),
            )),
        }
    }
}

/// A task belonging to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for the task
    pub id: EntityId,

    /// Task name
    pub name: String,

    /// Current status
    pub status: TaskStatus,

    /// Identifier of the owning project
    pub project_id: EntityId,

    /// Identifier of the user working on the task (optional)
    pub assigned_user_id: Option<EntityId>,
}

impl Record for Task {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Data for creating a new task
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Task name
    pub name: String,

    /// Initial status
    pub status: TaskStatus,

    /// Owning project
    pub project_id: EntityId,

    /// Assignee (optional)
    pub assigned_user_id: Option<EntityId>,
}

impl NewTask {
    /// Validate the new task data.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the name or project id is blank.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        if self.project_id.is_blank() {
            return Err(Error::invalid("project_id", "cannot be empty"));
        }
        if self.assigned_user_id.as_ref().is_some_and(EntityId::is_blank) {
            return Err(Error::invalid("assigned_user_id", "cannot be empty"));
        }
        Ok(())
    }

    pub(crate) fn into_task(self, id: EntityId) -> Task {
        Task {
            id,
            name: self.name.trim().to_string(),
            status: self.status,
            project_id: self.project_id,
            assigned_user_id: self.assigned_user_id,
        }
    }
}

// ========== Users ==========

/// Role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// Regular user
    Regular,

    /// Administrator
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular => write!(f, "Regular"),
            Self::Admin => write!(f, "Admin"),
        }
    }
}

impl FromStr for UserRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(Self::Regular),
            "admin" => Ok(Self::Admin),
            _ => Err(Error::invalid(
                "role",
                format!("'{}' is not one of Regular, Admin", s.trim()),
            )),
        }
    }
}

/// A user of the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Role
    pub role: UserRole,
}

impl User {
    /// Whether this user holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl Record for User {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Data for creating a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Role
    pub role: UserRole,
}

impl NewUser {
    /// Validate the new user data.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for a blank name or malformed email.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        if !validation::validate_email(&self.email) {
            return Err(Error::invalid(
                "email",
                format!("'{}' is not a valid email address", self.email.trim()),
            ));
        }
        Ok(())
    }

    pub(crate) fn into_user(self, id: EntityId) -> User {
        User {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role,
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if !validation::has_text(name) {
        return Err(Error::invalid("name", "cannot be empty"));
    }
    if name.trim().len() > MAX_NAME_LENGTH {
        return Err(Error::invalid(
            "name",
            format!("cannot exceed {MAX_NAME_LENGTH} characters"),
        ));
    }
    Ok(())
}
