//! Static role→permission table.
//!
//! The table is immutable and constructed at compile time; lookups are pure.
//! Fail-closed is structural here: `Role` is a closed enum and the match is
//! exhaustive, so there is no "unmapped role" path at runtime.

use crate::{Permission, Role};

impl Role {
    /// Permissions granted to this role.
    ///
    /// Admin ⊇ Manager ⊇ User: Admin holds all four, Manager everything but
    /// delete, User is read-only.
    pub fn permissions(self) -> &'static [Permission] {
        match self {
            Role::Admin => &[
                Permission::AddItem,
                Permission::EditItem,
                Permission::DeleteItem,
                Permission::ViewItem,
            ],
            Role::Manager => &[
                Permission::AddItem,
                Permission::EditItem,
                Permission::ViewItem,
            ],
            Role::User => &[Permission::ViewItem],
        }
    }
}

/// Set-membership check against the static table.
pub fn has_permission(role: Role, permission: Permission) -> bool {
    role.permissions().contains(&permission)
}
