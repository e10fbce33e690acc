use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Role, UserId};

/// The access control table for one shared document.
///
/// Maps each user to their role. Every table starts with exactly one owner,
/// the document's creator, and grows by upserts: granting a role to a user
/// who already has one replaces it, including downgrades.
///
/// Lookups for users with no entry answer `false`/`None` rather than
/// erroring, matching the rest of the crate's treatment of unknown IDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlTable {
    entries: HashMap<UserId, Role>,
}

impl AccessControlTable {
    /// A fresh table with `owner` as its sole entry. Every document's table
    /// starts this way; there is no ownerless table.
    pub fn with_owner(owner: UserId) -> Self {
        let mut entries = HashMap::new();
        entries.insert(owner, Role::Owner);
        AccessControlTable { entries }
    }

    pub fn grant(&mut self, user: UserId, role: Role) {
        self.entries.insert(user, role);
    }

    pub fn role_of(&self, user: &UserId) -> Option<Role> {
        self.entries.get(user).copied()
    }

    /// Whether `user` holds a role satisfying `required`.
    pub fn allows(&self, user: &UserId, required: Role) -> bool {
        self.role_of(user)
            .map(|role| role.satisfies(required))
            .unwrap_or(false)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&UserId, Role)> {
        self.entries.iter().map(|(user, role)| (user, *role))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
