//! Error types for taskboard operations.
//!
//! This is the caller-facing vocabulary. Lower layers have their own enums
//! ([`crate::storage::StoreError`], [`crate::id_generation::IdError`]); the
//! services are the only place those are translated into the kinds below.

use crate::domain::EntityId;
use crate::id_generation::IdError;
use std::io;
use thiserror::Error;

/// The error type for taskboard operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Input was missing, blank or out of its allowed range.
    #[error("Invalid {field}: {reason}")]
    InvalidArgument {
        /// The offending field or argument name.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// An identifier string did not parse to a slot index.
    #[error("Malformed identifier '{id}': {reason}")]
    MalformedIdentifier {
        /// The identifier as supplied.
        id: String,
        /// Why it was rejected.
        reason: String,
    },

    /// No entity with this identifier exists.
    #[error("{kind} not found: {id}")]
    EntityNotFound {
        /// Entity kind ("project", "task", "user").
        kind: &'static str,
        /// The identifier as supplied.
        id: String,
    },

    /// An entity already occupies the slot for this identifier.
    #[error("Duplicate {kind} identifier: {id}")]
    DuplicateIdentifier {
        /// Entity kind.
        kind: &'static str,
        /// The identifier that collided.
        id: EntityId,
    },

    /// A bulk read found nothing to show.
    #[error("No {0}s found")]
    EmptyStore(&'static str),

    /// The project referenced by an assignment does not exist.
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// The user is already assigned to the project.
    #[error("User {user_id} is already assigned to project {project_id}")]
    DuplicateAssignment {
        /// Project identifier.
        project_id: String,
        /// User identifier.
        user_id: EntityId,
    },

    /// The project's team is at capacity.
    #[error("Project {project_id} team is full ({team_size} members)")]
    TeamFull {
        /// Project identifier.
        project_id: String,
        /// The row capacity that was reached.
        team_size: usize,
    },

    /// The user is not assigned to the project.
    #[error("User {user_id} is not assigned to project {project_id}")]
    NoSuchAssignment {
        /// Project identifier.
        project_id: String,
        /// User identifier.
        user_id: EntityId,
    },

    /// The action requires a logged-in user.
    #[error("You must be logged in to {action}")]
    NotLoggedIn {
        /// Description of the attempted action.
        action: String,
    },

    /// The current user's role does not allow the action.
    #[error("Only Admin users can {action} (current role: {role})")]
    PermissionDenied {
        /// Description of the attempted action.
        action: String,
        /// Role of the current user.
        role: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

impl From<IdError> for Error {
    fn from(err: IdError) -> Self {
        match err {
            IdError::Malformed { id, reason } => Self::MalformedIdentifier { id, reason },
        }
    }
}

/// A specialized Result type for taskboard operations.
pub type Result<T> = std::result::Result<T, Error>;
