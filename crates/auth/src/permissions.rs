use serde::{Deserialize, Serialize};

/// A named action a role may or may not be allowed to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    AddItem,
    EditItem,
    DeleteItem,
    ViewItem,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Permission::AddItem,
        Permission::EditItem,
        Permission::DeleteItem,
        Permission::ViewItem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::AddItem => "add_item",
            Permission::EditItem => "edit_item",
            Permission::DeleteItem => "delete_item",
            Permission::ViewItem => "view_item",
        }
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
