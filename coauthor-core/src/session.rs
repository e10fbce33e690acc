use serde::{Deserialize, Serialize};

use crate::{SessionId, UnixTimestamp, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Closed,
}

impl SessionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }
}

/// One collaboration session.
///
/// A session is created by its initiator and closes automatically when the
/// last connected participant leaves. Closing a session does not touch the
/// documents created during it, they remain in the [`DocumentStore`] and
/// stay editable.
///
/// [`DocumentStore`]: crate::DocumentStore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationSession {
    pub id: SessionId,
    pub name: String,
    pub created_at: UnixTimestamp,
    pub created_by: UserId,
    pub status: SessionStatus,
}

impl CollaborationSession {
    pub(crate) fn new(now: UnixTimestamp, name: impl Into<String>, creator: UserId) -> Self {
        CollaborationSession {
            id: SessionId::new(),
            name: name.into(),
            created_at: now,
            created_by: creator,
            status: SessionStatus::Active,
        }
    }
}
