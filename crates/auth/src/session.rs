//! User registry and the single current session.
//!
//! At most one identity is logged in at a time; `login` replaces any prior
//! session implicitly and `logout` clears it. Inventory operations never see
//! the manager itself — they take a [`Session`] snapshot explicitly, so there
//! is no hidden global coupling between the stores.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Username};

use crate::user::{CredentialVerifier, PlaintextVerifier, User};
use crate::Role;

/// Snapshot of the currently logged-in identity.
///
/// Cheap to clone and deliberately detached from the registry: a session
/// value stays valid for the single-threaded operation it is passed into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    username: Username,
    role: Role,
}

impl Session {
    pub fn new(username: Username, role: Role) -> Self {
        Self { username, role }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// Registry of users plus the at-most-one active session.
pub struct UserManager {
    users: HashMap<Username, User>,
    verifier: Box<dyn CredentialVerifier>,
    current: Option<Username>,
}

impl Default for UserManager {
    fn default() -> Self {
        Self::new()
    }
}

impl UserManager {
    pub fn new() -> Self {
        Self::with_verifier(Box::new(PlaintextVerifier))
    }

    /// Construct with a custom credential scheme (e.g. a hashing verifier).
    pub fn with_verifier(verifier: Box<dyn CredentialVerifier>) -> Self {
        Self {
            users: HashMap::new(),
            verifier,
            current: None,
        }
    }

    /// Register a new user. Usernames are unique and immutable.
    pub fn register(
        &mut self,
        username: Username,
        password: impl Into<String>,
        role: Role,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.users.contains_key(&username) {
            return Err(DomainError::duplicate_key(username.as_str()));
        }
        let user = User::new(username.clone(), password, role, now)?;
        tracing::info!(user = %username, role = %role, "user registered");
        self.users.insert(username, user);
        Ok(())
    }

    /// Log in, replacing any prior session implicitly.
    ///
    /// Unknown username and wrong password both report
    /// [`DomainError::InvalidCredentials`]; the registry is not probeable.
    pub fn login(&mut self, username: &Username, password: &str) -> DomainResult<Session> {
        let verified = self
            .users
            .get(username)
            .is_some_and(|user| self.verifier.verify(user.stored_password(), password));
        if !verified {
            tracing::warn!(user = %username, "login rejected");
            return Err(DomainError::InvalidCredentials);
        }

        if let Some(previous) = self.current.replace(username.clone()) {
            if previous != *username {
                tracing::info!(user = %previous, "session replaced");
            }
        }
        tracing::info!(user = %username, "logged in");

        // Unwrap-free: verified above implies presence.
        Ok(self.session_for(username))
    }

    /// Log out the active session, reporting which user was logged out.
    pub fn logout(&mut self) -> DomainResult<Username> {
        match self.current.take() {
            Some(username) => {
                tracing::info!(user = %username, "logged out");
                Ok(username)
            }
            None => Err(DomainError::NoActiveSession),
        }
    }

    /// Snapshot of the active session, if any.
    pub fn session(&self) -> Option<Session> {
        self.current.as_ref().map(|u| self.session_for(u))
    }

    pub fn user(&self, username: &Username) -> Option<&User> {
        self.users.get(username)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    fn session_for(&self, username: &Username) -> Session {
        let role = self
            .users
            .get(username)
            .map(User::role)
            // The current pointer only ever holds registered usernames and
            // users are never deleted; fall back to the weakest role anyway.
            .unwrap_or(Role::User);
        Session::new(username.clone(), role)
    }
}

impl core::fmt::Debug for UserManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UserManager")
            .field("users", &self.users.len())
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with(users: &[(&str, &str, Role)]) -> UserManager {
        let mut manager = UserManager::new();
        for (name, password, role) in users {
            manager
                .register(Username::new(*name), *password, *role, Utc::now())
                .unwrap();
        }
        manager
    }

    #[test]
    fn register_rejects_duplicate_username() {
        let mut manager = manager_with(&[("alice", "pw", Role::Admin)]);
        let err = manager
            .register(Username::new("alice"), "other", Role::User, Utc::now())
            .unwrap_err();
        assert_eq!(err, DomainError::duplicate_key("alice"));
        assert_eq!(manager.user_count(), 1);
    }

    #[test]
    fn login_success_sets_session() {
        let mut manager = manager_with(&[("bob", "secret", Role::Manager)]);
        let session = manager.login(&Username::new("bob"), "secret").unwrap();
        assert_eq!(session.role(), Role::Manager);
        assert_eq!(manager.session(), Some(session));
    }

    #[test]
    fn login_mismatch_is_invalid_credentials() {
        let mut manager = manager_with(&[("bob", "secret", Role::Manager)]);
        assert_eq!(
            manager.login(&Username::new("bob"), "wrong"),
            Err(DomainError::InvalidCredentials)
        );
        assert_eq!(
            manager.login(&Username::new("nobody"), "secret"),
            Err(DomainError::InvalidCredentials)
        );
        assert!(manager.session().is_none());
    }

    #[test]
    fn login_replaces_prior_session() {
        let mut manager = manager_with(&[("alice", "a", Role::Admin), ("uli", "u", Role::User)]);
        manager.login(&Username::new("alice"), "a").unwrap();
        manager.login(&Username::new("uli"), "u").unwrap();
        let session = manager.session().unwrap();
        assert_eq!(session.username().as_str(), "uli");
        assert_eq!(session.role(), Role::User);
    }

    #[test]
    fn logout_clears_session_and_reports_user() {
        let mut manager = manager_with(&[("alice", "a", Role::Admin)]);
        manager.login(&Username::new("alice"), "a").unwrap();
        assert_eq!(manager.logout().unwrap().as_str(), "alice");
        assert!(manager.session().is_none());
        // Second logout has nothing to clear.
        assert_eq!(manager.logout(), Err(DomainError::NoActiveSession));
    }

    #[test]
    fn custom_verifier_is_consulted() {
        struct Backwards;
        impl CredentialVerifier for Backwards {
            fn verify(&self, stored: &str, presented: &str) -> bool {
                stored.chars().rev().collect::<String>() == presented
            }
        }

        let mut manager = UserManager::with_verifier(Box::new(Backwards));
        manager
            .register(Username::new("eve"), "abc", Role::User, Utc::now())
            .unwrap();
        assert!(manager.login(&Username::new("eve"), "abc").is_err());
        assert!(manager.login(&Username::new("eve"), "cba").is_ok());
    }
}
