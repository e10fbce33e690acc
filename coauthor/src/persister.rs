use std::collections::HashMap;

use futures::channel::mpsc;

use coauthor_core::{DocumentId, DocumentUpdate, StorageKey};

use crate::{Collab, storage::Storage};

/// Writes document state to a [`Storage`] as JSON records, driven by
/// [`DocumentUpdate`] events.
///
/// The core performs no IO of its own; it tells its host what changed
/// through the event bus, and this is the bundled listener that turns those
/// events into storage writes:
///
/// - `Created` and `Edited` write the document metadata record;
/// - `Edited` also writes the applied operation under its log index;
/// - `Shared` writes the granted role under the grantee's ACL key;
/// - `AnnotationAdded` writes the annotation.
///
/// The persister is pull-based. Events accumulate in its subscription until
/// the host calls [`Persister::flush`], typically after each batch of
/// mutations or on a timer.
pub struct Persister<S> {
    collab: Collab,
    storage: S,
    events: mpsc::UnboundedReceiver<DocumentUpdate>,
    next_op_index: HashMap<DocumentId, usize>,
}

impl<S: Storage> Persister<S> {
    pub fn new(collab: &Collab, storage: S) -> Self {
        Persister {
            collab: collab.clone(),
            storage,
            events: collab.subscribe_document_updates(),
            next_op_index: HashMap::new(),
        }
    }

    /// Drains every document update published since the last flush and
    /// writes the corresponding records. Returns the number of records
    /// written.
    pub fn flush(&mut self) -> usize {
        let mut written = 0;
        while let Ok(Some(update)) = self.events.try_next() {
            match update {
                DocumentUpdate::Created { document } => {
                    written +=
                        self.put_json(StorageKey::document_meta_path(&document.id), &document);
                }
                DocumentUpdate::Shared {
                    document_id,
                    user_id,
                    role,
                } => {
                    written += self.put_json(StorageKey::acl_path(&document_id, &user_id), &role);
                }
                DocumentUpdate::Edited {
                    document_id,
                    operation,
                    ..
                } => {
                    let index = self.next_op_index.get(&document_id).copied().unwrap_or(0);
                    written +=
                        self.put_json(StorageKey::operation_path(&document_id, index), &operation);
                    self.next_op_index.insert(document_id, index + 1);

                    // the version and modification metadata changed too
                    let meta = self
                        .collab
                        .with_workspace(|ws| ws.document(&document_id).cloned());
                    if let Some(meta) = meta {
                        written +=
                            self.put_json(StorageKey::document_meta_path(&document_id), &meta);
                    }
                }
                DocumentUpdate::AnnotationAdded {
                    document_id,
                    annotation,
                } => {
                    written += self.put_json(
                        StorageKey::annotation_path(&document_id, &annotation.id),
                        &annotation,
                    );
                }
            }
        }
        written
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn put_json<T: serde::Serialize>(&self, key: StorageKey, value: &T) -> usize {
        match serde_json::to_vec(value) {
            Ok(data) => {
                self.storage.put(key, data);
                1
            }
            Err(err) => {
                tracing::error!(%key, %err, "failed to encode storage record");
                0
            }
        }
    }
}
