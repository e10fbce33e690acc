use serde::{Deserialize, Serialize};

use crate::{
    CollaborationSession, CollaborationUser, DocumentAnnotation, DocumentId, EditOperation, Role,
    SessionId, SharedDocument, UserId,
};

/// A change to session membership or lifecycle.
///
/// Each variant carries strongly-typed fields rather than a string-keyed
/// payload map, so nothing is lost when an update crosses an abstraction or
/// process boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionUpdate {
    Created {
        session: CollaborationSession,
    },
    UserJoined {
        session_id: SessionId,
        user: CollaborationUser,
    },
    UserLeft {
        session_id: SessionId,
        user_id: UserId,
    },
    Closed {
        session_id: SessionId,
    },
    ConversationShared {
        session_id: SessionId,
        conversation_id: String,
        shared_by: UserId,
    },
}

impl SessionUpdate {
    /// The session this update concerns.
    pub fn session_id(&self) -> SessionId {
        match self {
            SessionUpdate::Created { session } => session.id,
            SessionUpdate::UserJoined { session_id, .. } => *session_id,
            SessionUpdate::UserLeft { session_id, .. } => *session_id,
            SessionUpdate::Closed { session_id } => *session_id,
            SessionUpdate::ConversationShared { session_id, .. } => *session_id,
        }
    }
}

/// A change to a shared document: creation, an ACL change, an applied edit,
/// or a new annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentUpdate {
    Created {
        document: SharedDocument,
    },
    /// An ACL upsert. `user_id` is the grantee.
    Shared {
        document_id: DocumentId,
        user_id: UserId,
        role: Role,
    },
    Edited {
        document_id: DocumentId,
        author: UserId,
        version: u64,
        operation: EditOperation,
    },
    AnnotationAdded {
        document_id: DocumentId,
        annotation: DocumentAnnotation,
    },
}

impl DocumentUpdate {
    /// The document this update concerns.
    pub fn document_id(&self) -> DocumentId {
        match self {
            DocumentUpdate::Created { document } => document.id,
            DocumentUpdate::Shared { document_id, .. } => *document_id,
            DocumentUpdate::Edited { document_id, .. } => *document_id,
            DocumentUpdate::AnnotationAdded { document_id, .. } => *document_id,
        }
    }
}
