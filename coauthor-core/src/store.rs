use std::collections::HashMap;

use crate::{
    AccessControlTable, AnnotationId, AnnotationReply, DocumentAnnotation, DocumentId,
    EditOperation, ReplicatedDocument, Role, SharedDocument, UnixTimestamp, UserId,
};

/// One document's state: metadata, access control, and the replica itself.
struct DocumentEntry {
    meta: SharedDocument,
    acl: AccessControlTable,
    replica: ReplicatedDocument,
}

/// The registry of shared documents.
///
/// Owns the `(SharedDocument, AccessControlTable, ReplicatedDocument)`
/// triple for every document and is the gated entry point for mutation:
/// edits require at least [`Role::Editor`], annotations at least
/// [`Role::Viewer`]. Failed attempts return `None`/`false` and leave the
/// document untouched, including its version counter.
///
/// The store has no session knowledge; the gate requiring an active session
/// for document creation lives in [`Workspace`](crate::Workspace).
pub struct DocumentStore {
    documents: HashMap<DocumentId, DocumentEntry>,
}

impl DocumentStore {
    pub fn new() -> Self {
        DocumentStore {
            documents: HashMap::new(),
        }
    }

    /// Creates a document at version 1 with `creator` as its sole owner and
    /// a replica initialized with `content`.
    pub fn create_document(
        &mut self,
        now: UnixTimestamp,
        title: impl Into<String>,
        content: impl Into<String>,
        creator: &UserId,
    ) -> SharedDocument {
        let meta = SharedDocument::new(now, title, creator.clone());
        let entry = DocumentEntry {
            meta: meta.clone(),
            acl: AccessControlTable::with_owner(creator.clone()),
            replica: ReplicatedDocument::new(content),
        };
        self.documents.insert(meta.id, entry);
        tracing::debug!(document_id = %meta.id, creator = %creator, "created document");
        meta
    }

    /// Upserts an ACL entry. Returns false if the document is unknown.
    pub fn share_document(&mut self, document_id: &DocumentId, user_id: UserId, role: Role) -> bool {
        let Some(entry) = self.documents.get_mut(document_id) else {
            tracing::warn!(%document_id, "share requested for unknown document");
            return false;
        };
        entry.acl.grant(user_id, role);
        true
    }

    /// Whether `user_id` holds a role on `document_id` satisfying
    /// `required`. Unknown users and unknown documents are both false.
    pub fn has_access(&self, user_id: &UserId, document_id: &DocumentId, required: Role) -> bool {
        self.documents
            .get(document_id)
            .map(|entry| entry.acl.allows(user_id, required))
            .unwrap_or(false)
    }

    /// Applies `op` to the document on behalf of `editor`.
    ///
    /// Returns the new version on success. Returns `None`, with no state
    /// change, if the document is unknown or `editor` does not hold at
    /// least [`Role::Editor`].
    pub fn apply_edit(
        &mut self,
        document_id: &DocumentId,
        editor: &UserId,
        op: EditOperation,
    ) -> Option<u64> {
        let Some(entry) = self.documents.get_mut(document_id) else {
            tracing::warn!(%document_id, "edit for unknown document");
            return None;
        };
        if !entry.acl.allows(editor, Role::Editor) {
            tracing::warn!(%document_id, editor = %editor, "edit denied");
            return None;
        }
        let at = op.timestamp;
        entry.replica.apply(op);
        entry.meta.record_edit(at, editor.clone());
        Some(entry.meta.version)
    }

    /// Anchors `annotation` to the document. The annotation's author must
    /// hold at least [`Role::Viewer`].
    pub fn add_annotation(
        &mut self,
        document_id: &DocumentId,
        annotation: DocumentAnnotation,
    ) -> bool {
        let Some(entry) = self.documents.get_mut(document_id) else {
            tracing::warn!(%document_id, "annotation for unknown document");
            return false;
        };
        if !entry.acl.allows(&annotation.author, Role::Viewer) {
            tracing::warn!(%document_id, author = %annotation.author, "annotation denied");
            return false;
        }
        entry.replica.add_annotation(annotation);
        true
    }

    /// Appends a reply to an existing annotation. The reply's author must
    /// hold at least [`Role::Viewer`].
    pub fn add_annotation_reply(
        &mut self,
        document_id: &DocumentId,
        annotation_id: &AnnotationId,
        reply: AnnotationReply,
    ) -> bool {
        let Some(entry) = self.documents.get_mut(document_id) else {
            tracing::warn!(%document_id, "annotation reply for unknown document");
            return false;
        };
        if !entry.acl.allows(&reply.author, Role::Viewer) {
            tracing::warn!(%document_id, author = %reply.author, "annotation reply denied");
            return false;
        }
        entry.replica.add_reply(annotation_id, reply)
    }

    pub fn contains(&self, document_id: &DocumentId) -> bool {
        self.documents.contains_key(document_id)
    }

    pub fn document(&self, document_id: &DocumentId) -> Option<&SharedDocument> {
        self.documents.get(document_id).map(|entry| &entry.meta)
    }

    pub fn content(&self, document_id: &DocumentId) -> Option<&str> {
        self.documents
            .get(document_id)
            .map(|entry| entry.replica.content())
    }

    /// The applied operations for a document, in application order.
    pub fn history(&self, document_id: &DocumentId) -> Option<&[EditOperation]> {
        self.documents
            .get(document_id)
            .map(|entry| entry.replica.history())
    }

    pub fn annotations(&self, document_id: &DocumentId) -> Option<&[DocumentAnnotation]> {
        self.documents
            .get(document_id)
            .map(|entry| entry.replica.annotations())
    }

    pub fn access_table(&self, document_id: &DocumentId) -> Option<&AccessControlTable> {
        self.documents.get(document_id).map(|entry| &entry.acl)
    }

    pub fn documents(&self) -> impl Iterator<Item = &SharedDocument> {
        self.documents.values().map(|entry| &entry.meta)
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
