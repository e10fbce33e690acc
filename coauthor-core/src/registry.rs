use std::collections::HashMap;

use crate::{
    CollaborationSession, CollaborationUser, SessionId, SessionStatus, UnixTimestamp, UserId,
};

/// What happened when a user left the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveOutcome {
    /// Whether the user was actually connected. Leaving while not connected
    /// is a no-op.
    pub was_connected: bool,
    /// Whether this leave emptied the session and closed it.
    pub session_closed: bool,
}

/// Tracks the current collaboration session and its connected participants.
///
/// A registry holds at most one session at a time. This is a deliberate
/// simplification, not a multi-tenant session store. Creating a session
/// replaces whatever session came before it. The session closes
/// automatically when its last connected participant leaves; the documents
/// created during it are unaffected.
///
/// The registry also keeps a roster of every user it has ever seen (the
/// creator plus everyone who joined), surviving leaves, so that edit history
/// can resolve author display names after the author has left.
pub struct SessionRegistry {
    session: Option<CollaborationSession>,
    connected: HashMap<UserId, CollaborationUser>,
    roster: HashMap<UserId, CollaborationUser>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        SessionRegistry {
            session: None,
            connected: HashMap::new(),
            roster: HashMap::new(),
        }
    }

    /// Creates a fresh session with `creator` as its sole connected
    /// participant, replacing any previous session.
    pub fn create_session(
        &mut self,
        now: UnixTimestamp,
        name: impl Into<String>,
        creator: CollaborationUser,
    ) -> CollaborationSession {
        if let Some(previous) = &self.session {
            tracing::debug!(previous = %previous.id, "replacing existing session");
        }
        let session = CollaborationSession::new(now, name, creator.id.clone());
        self.connected.clear();
        self.roster.insert(creator.id.clone(), creator.clone());
        self.connected.insert(creator.id.clone(), creator);
        self.session = Some(session.clone());
        session
    }

    /// Connects `user` to the active session.
    ///
    /// Returns true only if `session_id` names the currently active session.
    /// Re-joining while already connected is idempotent and returns true
    /// without duplicating the participant. A mismatched or nonexistent
    /// session returns false; it is not an error.
    pub fn join_session(&mut self, session_id: &SessionId, user: CollaborationUser) -> bool {
        let matches_active = self
            .session
            .as_ref()
            .map(|s| s.id == *session_id && s.status.is_active())
            .unwrap_or(false);
        if !matches_active {
            tracing::debug!(%session_id, user = %user.id, "join rejected, no matching active session");
            return false;
        }
        self.roster.insert(user.id.clone(), user.clone());
        self.connected.entry(user.id.clone()).or_insert(user);
        true
    }

    /// Disconnects `user_id`. The last participant to leave closes the
    /// session.
    pub fn leave_session(&mut self, user_id: &UserId) -> LeaveOutcome {
        let was_connected = self.connected.remove(user_id).is_some();
        let mut session_closed = false;
        if was_connected && self.connected.is_empty() {
            if let Some(session) = &mut self.session {
                if session.status.is_active() {
                    session.status = SessionStatus::Closed;
                    session_closed = true;
                    tracing::debug!(session_id = %session.id, "last participant left, session closed");
                }
            }
        }
        LeaveOutcome {
            was_connected,
            session_closed,
        }
    }

    /// The current session record, whether active or closed.
    pub fn session(&self) -> Option<&CollaborationSession> {
        self.session.as_ref()
    }

    /// The current session, only while it is active.
    pub fn active_session(&self) -> Option<&CollaborationSession> {
        self.session.as_ref().filter(|s| s.status.is_active())
    }

    pub fn is_connected(&self, user_id: &UserId) -> bool {
        self.connected.contains_key(user_id)
    }

    pub fn connected_users(&self) -> Vec<CollaborationUser> {
        self.connected.values().cloned().collect()
    }

    /// The display name of any user this registry has ever seen.
    pub fn display_name(&self, user_id: &UserId) -> Option<&str> {
        self.roster.get(user_id).map(|user| user.name.as_str())
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
