use serde::{Deserialize, Serialize};

/// The level of access a user has to one shared document.
///
/// Roles form a total order, `Viewer < Editor < Owner`, and a role grants
/// everything the roles below it grant. All permission checks in the crate
/// go through [`Role::satisfies`] so the ordering is defined in exactly one
/// place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Editor,
    Owner,
}

impl Role {
    /// Whether a user holding this role meets the given requirement.
    pub fn satisfies(self, required: Role) -> bool {
        self >= required
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Editor => "editor",
            Role::Owner => "owner",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
