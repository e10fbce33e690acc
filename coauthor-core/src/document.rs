use serde::{Deserialize, Serialize};

use crate::{DocumentId, UnixTimestamp, UserId};

/// Metadata for one shared document.
///
/// The version counter starts at 1 and increases by exactly one for every
/// successfully applied edit. Denied or rejected edit attempts never touch
/// it, so the version doubles as a count of applied operations plus one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedDocument {
    pub id: DocumentId,
    pub title: String,
    pub created_at: UnixTimestamp,
    pub created_by: UserId,
    pub last_modified_at: UnixTimestamp,
    pub last_modified_by: UserId,
    pub version: u64,
}

impl SharedDocument {
    pub(crate) fn new(now: UnixTimestamp, title: impl Into<String>, creator: UserId) -> Self {
        SharedDocument {
            id: DocumentId::new(),
            title: title.into(),
            created_at: now,
            created_by: creator.clone(),
            last_modified_at: now,
            last_modified_by: creator,
            version: 1,
        }
    }

    pub(crate) fn record_edit(&mut self, at: UnixTimestamp, editor: UserId) {
        self.version += 1;
        self.last_modified_at = at;
        self.last_modified_by = editor;
    }
}
