use futures::channel::mpsc;

use crate::{
    AnnotationId, AnnotationReply, CollaborationSession, CollaborationUser, DocumentAnnotation,
    DocumentId, DocumentStore, DocumentUpdate, EditOperation, EventBus, Role, SessionId,
    SessionRegistry, SessionUpdate, SharedDocument, UnixTimestamp, UserId,
};

/// Error returned by [`Workspace::create_shared_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CreateDocumentError {
    /// Documents can only be created inside an active collaboration
    /// session. This is a caller mistake, surfaced as a recoverable error;
    /// it never aborts the process.
    #[error("cannot create a shared document without an active session")]
    NoActiveSession,
}

/// The root of the collaboration core: one [`SessionRegistry`], one
/// [`DocumentStore`], one [`EventBus`], wired together.
///
/// A `Workspace` is constructed explicitly and passed around by the host;
/// there are no global instances. Every public method executes synchronously
/// on the calling thread and returns immediately; nothing suspends, blocks
/// on IO, or spawns background work.
///
/// The workspace performs **no internal locking**. All of its state is
/// mutable and shared by every caller, so a host using it from more than one
/// thread must serialize access itself. One mutex owning the whole
/// workspace is the intended shape, and the `coauthor` crate provides
/// exactly that. Correct ordered application depends on all edits for a
/// document passing through one workspace in a single total order.
///
/// Every successful mutation publishes a [`SessionUpdate`] or
/// [`DocumentUpdate`] on the bus; failed or denied calls publish nothing.
pub struct Workspace {
    registry: SessionRegistry,
    store: DocumentStore,
    bus: EventBus,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace {
            registry: SessionRegistry::new(),
            store: DocumentStore::new(),
            bus: EventBus::new(),
        }
    }

    // --- sessions ---

    /// Creates a fresh session as *the* active session, replacing any
    /// previous one, with `creator` as the sole connected participant.
    pub fn create_session(
        &mut self,
        now: UnixTimestamp,
        name: impl Into<String>,
        creator: CollaborationUser,
    ) -> CollaborationSession {
        let session = self.registry.create_session(now, name, creator);
        self.bus.publish_session(SessionUpdate::Created {
            session: session.clone(),
        });
        session
    }

    /// Connects `user` to the active session. Idempotent for users who are
    /// already connected; a re-join emits no duplicate event.
    pub fn join_session(&mut self, session_id: &SessionId, user: CollaborationUser) -> bool {
        let already_connected = self.registry.is_connected(&user.id);
        let event_user = user.clone();
        let joined = self.registry.join_session(session_id, user);
        if joined && !already_connected {
            self.bus.publish_session(SessionUpdate::UserJoined {
                session_id: *session_id,
                user: event_user,
            });
        }
        joined
    }

    /// Disconnects `user_id` from the session. A no-op for users who are
    /// not connected. When the last participant leaves, the session closes
    /// and a [`SessionUpdate::Closed`] is published; its documents remain
    /// editable.
    pub fn leave_session(&mut self, user_id: &UserId) {
        let Some(session_id) = self.registry.session().map(|s| s.id) else {
            return;
        };
        let outcome = self.registry.leave_session(user_id);
        if outcome.was_connected {
            self.bus.publish_session(SessionUpdate::UserLeft {
                session_id,
                user_id: user_id.clone(),
            });
        }
        if outcome.session_closed {
            self.bus
                .publish_session(SessionUpdate::Closed { session_id });
        }
    }

    pub fn connected_users(&self) -> Vec<CollaborationUser> {
        self.registry.connected_users()
    }

    /// The current session, only while it is active.
    pub fn active_session(&self) -> Option<&CollaborationSession> {
        self.registry.active_session()
    }

    /// The current session record, whether active or closed.
    pub fn session(&self) -> Option<&CollaborationSession> {
        self.registry.session()
    }

    /// Announces that `sharer` shared a conversation into the active
    /// session. Requires an active session and a connected sharer; carries
    /// no document state, only the announcement.
    pub fn share_conversation(
        &mut self,
        conversation_id: impl Into<String>,
        sharer: &UserId,
    ) -> bool {
        let Some(session_id) = self.registry.active_session().map(|s| s.id) else {
            tracing::debug!(sharer = %sharer, "conversation share with no active session");
            return false;
        };
        if !self.registry.is_connected(sharer) {
            tracing::debug!(sharer = %sharer, "conversation share from unconnected user");
            return false;
        }
        self.bus.publish_session(SessionUpdate::ConversationShared {
            session_id,
            conversation_id: conversation_id.into(),
            shared_by: sharer.clone(),
        });
        true
    }

    // --- documents ---

    /// Creates a shared document. Requires an active session; seeds version
    /// 1 and an ACL with `creator` as sole owner.
    pub fn create_shared_document(
        &mut self,
        now: UnixTimestamp,
        title: impl Into<String>,
        content: impl Into<String>,
        creator: &UserId,
    ) -> Result<SharedDocument, CreateDocumentError> {
        if self.registry.active_session().is_none() {
            tracing::warn!(creator = %creator, "document creation with no active session");
            return Err(CreateDocumentError::NoActiveSession);
        }
        let document = self.store.create_document(now, title, content, creator);
        self.bus.publish_document(DocumentUpdate::Created {
            document: document.clone(),
        });
        Ok(document)
    }

    /// Upserts an ACL entry for `user_id` on `document_id`. Returns false
    /// if the document is unknown.
    pub fn share_document(&mut self, document_id: &DocumentId, user_id: &UserId, role: Role) -> bool {
        if !self.store.share_document(document_id, user_id.clone(), role) {
            return false;
        }
        self.bus.publish_document(DocumentUpdate::Shared {
            document_id: *document_id,
            user_id: user_id.clone(),
            role,
        });
        true
    }

    pub fn has_document_access(
        &self,
        user_id: &UserId,
        document_id: &DocumentId,
        required: Role,
    ) -> bool {
        self.store.has_access(user_id, document_id, required)
    }

    /// Applies `op` to `document_id` on behalf of `editor`.
    ///
    /// The gated entry point for edits: the document must exist and
    /// `editor` must hold at least [`Role::Editor`]. On success the
    /// document's version increments, its modification metadata updates,
    /// and a [`DocumentUpdate::Edited`] carrying the new version is
    /// published. On any failure nothing changes and the call returns
    /// false.
    pub fn apply_edit(
        &mut self,
        document_id: &DocumentId,
        editor: &UserId,
        op: EditOperation,
    ) -> bool {
        let event_op = op.clone();
        match self.store.apply_edit(document_id, editor, op) {
            Some(version) => {
                self.bus.publish_document(DocumentUpdate::Edited {
                    document_id: *document_id,
                    author: editor.clone(),
                    version,
                    operation: event_op,
                });
                true
            }
            None => false,
        }
    }

    /// Anchors `annotation` to `document_id`. The author needs at least
    /// [`Role::Viewer`]. The anchor position is fixed at insertion and is
    /// never shifted by later edits.
    pub fn add_annotation(
        &mut self,
        document_id: &DocumentId,
        annotation: DocumentAnnotation,
    ) -> bool {
        if !self.store.add_annotation(document_id, annotation.clone()) {
            return false;
        }
        self.bus.publish_document(DocumentUpdate::AnnotationAdded {
            document_id: *document_id,
            annotation,
        });
        true
    }

    /// Appends a reply to an existing annotation. The reply's author needs
    /// at least [`Role::Viewer`]. Replies only accumulate; there is no way
    /// to remove one.
    pub fn add_annotation_reply(
        &mut self,
        document_id: &DocumentId,
        annotation_id: &AnnotationId,
        reply: AnnotationReply,
    ) -> bool {
        self.store
            .add_annotation_reply(document_id, annotation_id, reply)
    }

    // --- reads ---

    pub fn document(&self, document_id: &DocumentId) -> Option<&SharedDocument> {
        self.store.document(document_id)
    }

    pub fn document_content(&self, document_id: &DocumentId) -> Option<&str> {
        self.store.content(document_id)
    }

    /// The applied operations for a document paired with their authors'
    /// display names. Names resolve against the registry roster; an author
    /// the registry has never seen falls back to their raw ID.
    pub fn edit_history(&self, document_id: &DocumentId) -> Vec<(EditOperation, String)> {
        self.store
            .history(document_id)
            .map(|ops| {
                ops.iter()
                    .map(|op| {
                        let name = self
                            .registry
                            .display_name(&op.author)
                            .map(str::to_owned)
                            .unwrap_or_else(|| op.author.to_string());
                        (op.clone(), name)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn annotations(&self, document_id: &DocumentId) -> Option<&[DocumentAnnotation]> {
        self.store.annotations(document_id)
    }

    pub fn documents(&self) -> impl Iterator<Item = &SharedDocument> {
        self.store.documents()
    }

    pub fn session_registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn document_store(&self) -> &DocumentStore {
        &self.store
    }

    // --- events ---

    pub fn subscribe_session_updates(&mut self) -> mpsc::UnboundedReceiver<SessionUpdate> {
        self.bus.subscribe_sessions()
    }

    pub fn subscribe_document_updates(&mut self) -> mpsc::UnboundedReceiver<DocumentUpdate> {
        self.bus.subscribe_documents()
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
