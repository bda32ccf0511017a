//! Login state and permission gates.

use super::UserService;
use crate::domain::{EntityId, User};
use crate::error::{Error, Result};
use tracing::{info, warn};

/// Tracks which user, if any, is logged in.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<EntityId>,
}

impl Session {
    /// A session with nobody logged in
    pub fn new() -> Self {
        Self::default()
    }

    /// Log in as `user_id`, replacing any previous login.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if the user does not exist.
    pub fn login(&mut self, users: &UserService, user_id: &str) -> Result<User> {
        let user = users.get_by_id(user_id)?.clone();
        info!(id = %user.id, role = %user.role, "Logged in");
        self.current = Some(user.id.clone());
        Ok(user)
    }

    /// Log out; returns the identifier that was logged in
    pub fn logout(&mut self) -> Option<EntityId> {
        let previous = self.current.take();
        if let Some(id) = &previous {
            info!(%id, "Logged out");
        }
        previous
    }

    /// Identifier of the logged-in user
    pub fn current(&self) -> Option<&EntityId> {
        self.current.as_ref()
    }

    /// The logged-in user's record, if they still exist
    pub fn current_user<'a>(&self, users: &'a UserService) -> Option<&'a User> {
        self.current
            .as_ref()
            .and_then(|id| users.get_by_id(id.as_str()).ok())
    }

    /// Fail unless someone is logged in.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotLoggedIn` naming `action`.
    pub fn require_logged_in(&self, action: &str) -> Result<&EntityId> {
        self.current.as_ref().ok_or_else(|| {
            warn!(action, "Rejected: not logged in");
            Error::NotLoggedIn {
                action: action.to_string(),
            }
        })
    }

    /// Fail unless the logged-in user is an admin.
    ///
    /// A login whose user has since been deleted counts as logged out.
    ///
    /// # Errors
    ///
    /// - `Error::NotLoggedIn` if nobody (or a deleted user) is logged in
    /// - `Error::PermissionDenied` if the user is not an admin
    pub fn require_admin<'a>(&self, users: &'a UserService, action: &str) -> Result<&'a User> {
        self.require_logged_in(action)?;
        let user = self
            .current_user(users)
            .ok_or_else(|| Error::NotLoggedIn {
                action: action.to_string(),
            })?;
        if !user.is_admin() {
            warn!(id = %user.id, action, "Rejected: admin role required");
            return Err(Error::PermissionDenied {
                action: action.to_string(),
                role: user.role.to_string(),
            });
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewUser, UserRole};

    fn users() -> UserService {
        let mut users = UserService::default();
        for (name, role) in [("Alice", UserRole::Admin), ("Bob", UserRole::Regular)] {
            users
                .create(NewUser {
                    name: name.to_string(),
                    email: format!("{}@example.com", name.to_lowercase()),
                    role,
                })
                .unwrap();
        }
        users
    }

    #[test]
    fn test_gates_when_logged_out() {
        let users = users();
        let session = Session::new();

        assert!(matches!(
            session.require_logged_in("add tasks"),
            Err(Error::NotLoggedIn { .. })
        ));
        assert!(matches!(
            session.require_admin(&users, "delete tasks"),
            Err(Error::NotLoggedIn { .. })
        ));
    }

    #[test]
    fn test_regular_user_cannot_pass_admin_gate() {
        let users = users();
        let mut session = Session::new();
        session.login(&users, "U0001").unwrap();

        assert!(session.require_logged_in("add tasks").is_ok());
        let err = session.require_admin(&users, "delete tasks").unwrap_err();
        assert!(matches!(err, Error::PermissionDenied { ref role, .. } if role == "Regular"));
    }

    #[test]
    fn test_admin_passes_and_logout_clears() {
        let users = users();
        let mut session = Session::new();
        session.login(&users, "U0000").unwrap();
        assert_eq!(
            session.require_admin(&users, "delete tasks").unwrap().name,
            "Alice"
        );

        assert_eq!(session.logout(), Some(EntityId::new("U0000")));
        assert!(session.current().is_none());
        assert_eq!(session.logout(), None);
    }

    #[test]
    fn test_login_unknown_user_keeps_previous() {
        let users = users();
        let mut session = Session::new();
        session.login(&users, "U0000").unwrap();

        assert!(session.login(&users, "U0042").is_err());
        assert_eq!(session.current().map(EntityId::as_str), Some("U0000"));
    }

    #[test]
    fn test_deleted_user_fails_admin_gate() {
        let mut users = users();
        let mut session = Session::new();
        session.login(&users, "U0000").unwrap();
        users.delete_by_id("U0000").unwrap();

        assert!(matches!(
            session.require_admin(&users, "delete tasks"),
            Err(Error::NotLoggedIn { .. })
        ));
    }
}
