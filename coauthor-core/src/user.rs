use serde::{Deserialize, Serialize};

use crate::UserId;

/// A participant in a collaboration session.
///
/// Users arrive from the host application already identified; the core does
/// not authenticate them. The `avatar` field is an opaque reference (a URL or
/// asset name) which the core carries but never interprets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl CollaborationUser {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        CollaborationUser {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}
