use futures::channel::mpsc;

use crate::{DocumentUpdate, SessionUpdate};

/// Synchronous fan-out of [`SessionUpdate`] and [`DocumentUpdate`] events.
///
/// Subscribing returns an unbounded receiver; publishing sends the update to
/// every receiver that is still alive at publish time, pruning the ones
/// whose subscriber has been dropped. There is no buffering or replay; a
/// subscriber which attaches after an event fired never sees it.
///
/// The receivers implement [`futures::Stream`] for hosts with an executor,
/// and `try_next()` works without one for synchronous consumers.
pub struct EventBus {
    session_listeners: Vec<mpsc::UnboundedSender<SessionUpdate>>,
    document_listeners: Vec<mpsc::UnboundedSender<DocumentUpdate>>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus {
            session_listeners: Vec::new(),
            document_listeners: Vec::new(),
        }
    }

    pub fn subscribe_sessions(&mut self) -> mpsc::UnboundedReceiver<SessionUpdate> {
        let (tx, rx) = mpsc::unbounded();
        self.session_listeners.push(tx);
        rx
    }

    pub fn subscribe_documents(&mut self) -> mpsc::UnboundedReceiver<DocumentUpdate> {
        let (tx, rx) = mpsc::unbounded();
        self.document_listeners.push(tx);
        rx
    }

    pub fn publish_session(&mut self, update: SessionUpdate) {
        tracing::trace!(?update, "publishing session update");
        self.session_listeners
            .retain_mut(|listener| listener.unbounded_send(update.clone()).is_ok());
    }

    pub fn publish_document(&mut self, update: DocumentUpdate) {
        tracing::trace!(?update, "publishing document update");
        self.document_listeners
            .retain_mut(|listener| listener.unbounded_send(update.clone()).is_ok());
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
