//! User service.

use super::{Catalog, translate};
use crate::domain::{EntityKind, NewUser, User};
use crate::error::{Error, Result};
use crate::storage::{IndexedStore, UserQueries};
use crate::validation;
use tracing::info;

/// Owns the user store and the user ID generator.
#[derive(Debug, Clone)]
pub struct UserService {
    catalog: Catalog<User>,
}

impl UserService {
    /// Create a service with `capacity` initial user slots
    pub fn new(capacity: usize) -> Self {
        Self {
            catalog: Catalog::new(EntityKind::User, capacity),
        }
    }

    /// Read access to the user store
    pub fn store(&self) -> &IndexedStore<User> {
        self.catalog.store()
    }

    /// Register a user and assign them the next identifier.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` if the name is blank or the email malformed
    /// - `Error::DuplicateIdentifier` if the derived slot is already taken
    pub fn create(&mut self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        let user = self.catalog.insert_with(|id| new_user.into_user(id))?;
        info!(id = %user.id, role = %user.role, "Created user");
        Ok(user)
    }

    /// Look up a user.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` for malformed or unknown identifiers.
    pub fn get_by_id(&self, id: &str) -> Result<&User> {
        self.catalog.get(id)
    }

    /// All users in identifier order (empty when none exist)
    pub fn get_all(&self) -> Vec<&User> {
        self.catalog.all()
    }

    /// All users, failing with `Error::EmptyStore` when none exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyStore` if no user is stored.
    pub fn require_all(&self) -> Result<Vec<&User>> {
        self.catalog.require_all()
    }

    /// Number of registered users
    pub fn count(&self) -> usize {
        self.catalog.count()
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if the user does not exist.
    pub fn delete_by_id(&mut self, id: &str) -> Result<User> {
        let user = self.catalog.delete(id)?;
        info!(id = %user.id, "Deleted user");
        Ok(user)
    }

    /// Change a user's email address.
    ///
    /// # Errors
    ///
    /// - `Error::EntityNotFound` if the user does not exist
    /// - `Error::InvalidArgument` if the email is malformed
    pub fn update_email(&mut self, id: &str, email: &str) -> Result<User> {
        self.catalog.modify(id, |user| {
            if !validation::validate_email(email) {
                return Err(Error::invalid(
                    "email",
                    format!("'{}' is not a valid email address", email.trim()),
                ));
            }
            user.email = email.trim().to_string();
            Ok(())
        })
    }

    /// Users holding `role` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `role` is blank.
    pub fn filter_by_role(&self, role: &str) -> Result<Vec<&User>> {
        self.store()
            .find_by_role(role)
            .map_err(|e| translate(EntityKind::User, "", e))
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new(EntityKind::User.default_capacity())
    }
}
