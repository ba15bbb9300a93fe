//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every operation in the system degrades to "no-op + reported error" rather
/// than aborting; all variants here are recoverable. The two authorization
/// denial reasons are distinct variants so callers can tell "nobody is logged
/// in" from "the logged-in role lacks the permission".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No identity is logged in; gated operations fail closed.
    #[error("no active session")]
    NoActiveSession,

    /// The current identity's role does not grant the required permission.
    #[error("permission denied: role '{role}' lacks '{permission}'")]
    PermissionDenied { role: String, permission: String },

    /// A unique key (username, item id) already exists.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// A requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Login failed: unknown username or wrong password.
    ///
    /// Deliberately does not say which, to avoid probing the user registry.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A value failed validation (e.g. empty key).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn permission_denied(role: impl Into<String>, permission: impl Into<String>) -> Self {
        Self::PermissionDenied {
            role: role.into(),
            permission: permission.into(),
        }
    }

    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey(key.into())
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
