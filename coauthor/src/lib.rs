use std::sync::{Arc, Mutex};

use futures::channel::mpsc;

pub use coauthor_core::{
    AccessControlTable, AnnotationId, AnnotationKind, AnnotationReply, CollaborationSession,
    CollaborationUser, CreateDocumentError, DocumentAnnotation, DocumentId, DocumentUpdate,
    EditKind, EditOperation, Role, SessionId, SessionStatus, SessionUpdate, SharedDocument,
    UnixTimestamp, UserId, Workspace,
};

mod document_handle;
pub use document_handle::DocumentHandle;
mod persister;
pub use persister::Persister;
pub mod storage;

/// A thread-safe handle to one collaboration [`Workspace`].
///
/// The core performs no internal locking; `Collab` is the bundled way to use
/// it from more than one thread. Every clone shares the same workspace
/// behind one mutex, so all edits funnel through a single total order no
/// matter which thread they arrive on.
///
/// Methods which stamp creation times do so with [`UnixTimestamp::now()`];
/// hosts that need to control the clock can call the core directly through
/// [`Collab::with_workspace`].
#[derive(Clone)]
pub struct Collab {
    inner: Arc<Mutex<Workspace>>,
}

impl Collab {
    pub fn new() -> Self {
        Collab {
            inner: Arc::new(Mutex::new(Workspace::new())),
        }
    }

    /// Run `f` against the underlying workspace while holding the lock.
    ///
    /// This is the escape hatch for anything the convenience methods below
    /// don't cover. Keep the closure short: every other handle blocks until
    /// it returns.
    pub fn with_workspace<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Workspace) -> R,
    {
        f(&mut self.inner.lock().unwrap())
    }

    // --- sessions ---

    pub fn create_session(
        &self,
        name: impl Into<String>,
        creator: CollaborationUser,
    ) -> CollaborationSession {
        self.inner
            .lock()
            .unwrap()
            .create_session(UnixTimestamp::now(), name, creator)
    }

    pub fn join_session(&self, session_id: &SessionId, user: CollaborationUser) -> bool {
        self.inner.lock().unwrap().join_session(session_id, user)
    }

    pub fn leave_session(&self, user_id: &UserId) {
        self.inner.lock().unwrap().leave_session(user_id)
    }

    pub fn connected_users(&self) -> Vec<CollaborationUser> {
        self.inner.lock().unwrap().connected_users()
    }

    pub fn active_session(&self) -> Option<CollaborationSession> {
        self.inner.lock().unwrap().active_session().cloned()
    }

    pub fn share_conversation(&self, conversation_id: impl Into<String>, sharer: &UserId) -> bool {
        self.inner
            .lock()
            .unwrap()
            .share_conversation(conversation_id, sharer)
    }

    // --- documents ---

    /// Creates a shared document and returns a handle to it.
    ///
    /// Requires an active session, like
    /// [`Workspace::create_shared_document`].
    pub fn create_document(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
        creator: &UserId,
    ) -> Result<DocumentHandle, CreateDocumentError> {
        let document = self.inner.lock().unwrap().create_shared_document(
            UnixTimestamp::now(),
            title,
            content,
            creator,
        )?;
        Ok(DocumentHandle::new(document.id, self.inner.clone()))
    }

    /// A handle to an existing document, or `None` if the ID is unknown.
    pub fn document(&self, document_id: &DocumentId) -> Option<DocumentHandle> {
        let known = self
            .inner
            .lock()
            .unwrap()
            .document(document_id)
            .is_some();
        known.then(|| DocumentHandle::new(*document_id, self.inner.clone()))
    }

    pub fn share_document(&self, document_id: &DocumentId, user_id: &UserId, role: Role) -> bool {
        self.inner
            .lock()
            .unwrap()
            .share_document(document_id, user_id, role)
    }

    pub fn has_document_access(
        &self,
        user_id: &UserId,
        document_id: &DocumentId,
        required: Role,
    ) -> bool {
        self.inner
            .lock()
            .unwrap()
            .has_document_access(user_id, document_id, required)
    }

    pub fn apply_edit(&self, document_id: &DocumentId, editor: &UserId, op: EditOperation) -> bool {
        self.inner
            .lock()
            .unwrap()
            .apply_edit(document_id, editor, op)
    }

    pub fn documents(&self) -> Vec<SharedDocument> {
        self.inner.lock().unwrap().documents().cloned().collect()
    }

    // --- events ---

    pub fn subscribe_session_updates(&self) -> mpsc::UnboundedReceiver<SessionUpdate> {
        self.inner.lock().unwrap().subscribe_session_updates()
    }

    pub fn subscribe_document_updates(&self) -> mpsc::UnboundedReceiver<DocumentUpdate> {
        self.inner.lock().unwrap().subscribe_document_updates()
    }
}

impl Default for Collab {
    fn default() -> Self {
        Self::new()
    }
}
