use std::sync::{Arc, Mutex};

use coauthor_core::{
    AnnotationId, AnnotationReply, DocumentAnnotation, DocumentId, EditOperation, SharedDocument,
    UserId, Workspace,
};

/// A handle to one shared document inside a [`Collab`](crate::Collab).
///
/// Handles are cheap to clone and address the document by ID; all state
/// lives in the shared workspace. Documents are never removed, so a handle
/// stays valid for the lifetime of the workspace and the accessors only
/// return `None` if the handle was constructed against a different
/// workspace.
#[derive(Clone)]
pub struct DocumentHandle {
    inner: Arc<Mutex<Workspace>>,
    document_id: DocumentId,
}

impl std::fmt::Debug for DocumentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentHandle")
            .field("document_id", &self.document_id)
            .finish()
    }
}

impl DocumentHandle {
    pub(crate) fn new(document_id: DocumentId, inner: Arc<Mutex<Workspace>>) -> Self {
        DocumentHandle { inner, document_id }
    }

    /// The ID of this document
    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    pub fn meta(&self) -> Option<SharedDocument> {
        self.inner.lock().unwrap().document(&self.document_id).cloned()
    }

    pub fn content(&self) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .document_content(&self.document_id)
            .map(str::to_owned)
    }

    /// Applies `op` on behalf of `editor`. Same gating and result as
    /// [`Workspace::apply_edit`].
    pub fn apply(&self, editor: &UserId, op: EditOperation) -> bool {
        self.inner
            .lock()
            .unwrap()
            .apply_edit(&self.document_id, editor, op)
    }

    pub fn annotate(&self, annotation: DocumentAnnotation) -> bool {
        self.inner
            .lock()
            .unwrap()
            .add_annotation(&self.document_id, annotation)
    }

    pub fn reply(&self, annotation_id: &AnnotationId, reply: AnnotationReply) -> bool {
        self.inner
            .lock()
            .unwrap()
            .add_annotation_reply(&self.document_id, annotation_id, reply)
    }

    /// Applied operations with their authors' display names.
    pub fn history(&self) -> Vec<(EditOperation, String)> {
        self.inner.lock().unwrap().edit_history(&self.document_id)
    }

    pub fn annotations(&self) -> Vec<DocumentAnnotation> {
        self.inner
            .lock()
            .unwrap()
            .annotations(&self.document_id)
            .map(|a| a.to_vec())
            .unwrap_or_default()
    }
}
