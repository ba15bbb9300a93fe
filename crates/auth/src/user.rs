//! User records and the credential comparison seam.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, Username};

use crate::Role;

/// A registered user.
///
/// # Invariants
/// - `username` is the unique key and is immutable after registration.
/// - `role` is immutable after registration.
/// - Users are never deleted in the current scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    username: Username,
    // Stored as provided. Plaintext storage is a known defect of the system
    // being modeled; comparison goes through `CredentialVerifier` so a hashed
    // scheme can be swapped in without touching call sites.
    password: String,
    role: Role,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: Username,
        password: impl Into<String>,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let password = password.into();
        if username.as_str().trim().is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }
        if password.is_empty() {
            return Err(DomainError::validation("password cannot be empty"));
        }
        Ok(Self {
            username,
            password,
            role,
            created_at,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn stored_password(&self) -> &str {
        &self.password
    }
}

impl core::fmt::Display for User {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.username, self.role)
    }
}

/// Credential comparison seam.
///
/// The only implementation today compares plaintext, matching the modeled
/// system. Keeping the comparison behind a trait means a hashing scheme can
/// replace it without changing `UserManager`.
pub trait CredentialVerifier {
    fn verify(&self, stored: &str, presented: &str) -> bool;
}

/// Plaintext equality check. Insecure; see [`CredentialVerifier`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn verify(&self, stored: &str, presented: &str) -> bool {
        stored == presented
    }
}
