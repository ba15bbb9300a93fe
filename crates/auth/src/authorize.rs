//! Authorization gate for gated operations.
//!
//! Every inventory operation (mutating and read) calls [`authorize`] before
//! doing anything else; on denial the operation performs no side effect and
//! returns no data.

use stockroom_core::DomainError;

use crate::policy::has_permission;
use crate::session::Session;
use crate::Permission;

/// Authorize the given session for a required permission.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
///
/// Fails closed with [`DomainError::NoActiveSession`] when no identity is
/// logged in — the permission table is never consulted in that case. The two
/// denial reasons are distinct variants, not a boolean.
pub fn authorize(session: Option<&Session>, required: Permission) -> Result<(), DomainError> {
    let Some(session) = session else {
        tracing::warn!(permission = %required, "denied: no active session");
        return Err(DomainError::NoActiveSession);
    };

    if has_permission(session.role(), required) {
        Ok(())
    } else {
        tracing::warn!(
            user = %session.username(),
            role = %session.role(),
            permission = %required,
            "denied: insufficient role"
        );
        Err(DomainError::permission_denied(
            session.role().as_str(),
            required.as_str(),
        ))
    }
}
