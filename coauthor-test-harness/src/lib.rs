use std::collections::HashMap;
use std::time::Duration;

use futures::channel::mpsc;

use coauthor_core::{
    AnnotationKind, CollaborationSession, CollaborationUser, CreateDocumentError,
    DocumentAnnotation, DocumentId, DocumentUpdate, EditOperation, Role, SessionUpdate,
    SharedDocument, UnixTimestamp, UserId, Workspace,
};

/// Drives one [`Workspace`] through collaboration scenarios.
///
/// Participants are addressed by nickname; the harness mints a stable
/// `UserId` and an email for each nickname on first use. Timestamps come
/// from a deterministic clock which advances by one millisecond per stamped
/// call, so tests never depend on wall-clock time.
///
/// The harness subscribes to both event families at construction and
/// exposes the accumulated events through [`Harness::session_events`] and
/// [`Harness::document_events`], which drain everything published since the
/// previous drain.
pub struct Harness {
    workspace: Workspace,
    users: HashMap<String, CollaborationUser>,
    clock: UnixTimestamp,
    session_rx: mpsc::UnboundedReceiver<SessionUpdate>,
    document_rx: mpsc::UnboundedReceiver<DocumentUpdate>,
}

impl Harness {
    pub fn new() -> Self {
        let mut workspace = Workspace::new();
        let session_rx = workspace.subscribe_session_updates();
        let document_rx = workspace.subscribe_document_updates();
        Harness {
            workspace,
            users: HashMap::new(),
            clock: UnixTimestamp::from_millis(1_700_000_000_000),
            session_rx,
            document_rx,
        }
    }

    /// The user registered under `nickname`, created on first use.
    pub fn user(&mut self, nickname: &str) -> CollaborationUser {
        self.users
            .entry(nickname.to_string())
            .or_insert_with(|| {
                CollaborationUser::new(
                    format!("user-{nickname}"),
                    nickname,
                    format!("{nickname}@example.com"),
                )
            })
            .clone()
    }

    pub fn user_id(&mut self, nickname: &str) -> UserId {
        self.user(nickname).id
    }

    /// Advances the deterministic clock and returns the new timestamp.
    pub fn tick(&mut self) -> UnixTimestamp {
        self.clock += Duration::from_millis(1);
        self.clock
    }

    pub fn create_session(&mut self, name: &str, nickname: &str) -> CollaborationSession {
        let creator = self.user(nickname);
        let now = self.tick();
        self.workspace.create_session(now, name, creator)
    }

    /// Joins `nickname` to the current session, whatever its ID is.
    pub fn join_session(&mut self, nickname: &str) -> bool {
        let Some(session_id) = self.workspace.session().map(|s| s.id) else {
            return false;
        };
        let user = self.user(nickname);
        self.workspace.join_session(&session_id, user)
    }

    pub fn leave_session(&mut self, nickname: &str) {
        let user_id = self.user_id(nickname);
        self.workspace.leave_session(&user_id);
    }

    pub fn create_document(
        &mut self,
        title: &str,
        content: &str,
        nickname: &str,
    ) -> Result<SharedDocument, CreateDocumentError> {
        let creator = self.user_id(nickname);
        let now = self.tick();
        self.workspace
            .create_shared_document(now, title, content, &creator)
    }

    pub fn share_document(&mut self, document_id: &DocumentId, nickname: &str, role: Role) -> bool {
        let user_id = self.user_id(nickname);
        self.workspace.share_document(document_id, &user_id, role)
    }

    pub fn insert(
        &mut self,
        document_id: &DocumentId,
        nickname: &str,
        position: usize,
        text: &str,
    ) -> bool {
        let author = self.user_id(nickname);
        let at = self.tick();
        let op = EditOperation::insert(author.clone(), position, text, at);
        self.workspace.apply_edit(document_id, &author, op)
    }

    pub fn delete(
        &mut self,
        document_id: &DocumentId,
        nickname: &str,
        position: usize,
        text: &str,
    ) -> bool {
        let author = self.user_id(nickname);
        let at = self.tick();
        let op = EditOperation::delete(author.clone(), position, text, at);
        self.workspace.apply_edit(document_id, &author, op)
    }

    pub fn replace(
        &mut self,
        document_id: &DocumentId,
        nickname: &str,
        position: usize,
        text: &str,
    ) -> bool {
        let author = self.user_id(nickname);
        let at = self.tick();
        let op = EditOperation::replace(author.clone(), position, text, at);
        self.workspace.apply_edit(document_id, &author, op)
    }

    pub fn annotate(
        &mut self,
        document_id: &DocumentId,
        nickname: &str,
        kind: AnnotationKind,
        position: usize,
        content: &str,
    ) -> bool {
        let author = self.user_id(nickname);
        let at = self.tick();
        let annotation = DocumentAnnotation::new(author, kind, position, content, at);
        self.workspace.add_annotation(document_id, annotation)
    }

    pub fn content(&self, document_id: &DocumentId) -> Option<String> {
        self.workspace
            .document_content(document_id)
            .map(str::to_owned)
    }

    pub fn version(&self, document_id: &DocumentId) -> Option<u64> {
        self.workspace.document(document_id).map(|doc| doc.version)
    }

    /// Drains every session update published since the previous drain.
    pub fn session_events(&mut self) -> Vec<SessionUpdate> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.session_rx.try_next() {
            events.push(event);
        }
        events
    }

    /// Drains every document update published since the previous drain.
    pub fn document_events(&mut self) -> Vec<DocumentUpdate> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.document_rx.try_next() {
            events.push(event);
        }
        events
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
