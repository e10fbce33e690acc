use serde::{Deserialize, Serialize};

use crate::{UnixTimestamp, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    Insert,
    Delete,
    Replace,
}

impl EditKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditKind::Insert => "insert",
            EditKind::Delete => "delete",
            EditKind::Replace => "replace",
        }
    }
}

/// One edit to a shared document.
///
/// Operations are plain data so they can cross a process or network boundary
/// unchanged: an author, a kind, a character offset, the affected text, and
/// the author's timestamp. Positions are clamped into the document bounds at
/// apply time rather than rejected; see
/// [`ReplicatedDocument::apply`](crate::ReplicatedDocument::apply).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOperation {
    pub kind: EditKind,
    pub position: usize,
    pub content: String,
    pub timestamp: UnixTimestamp,
    pub author: UserId,
}

impl EditOperation {
    /// An insertion of `content` at `position`.
    pub fn insert(
        author: impl Into<UserId>,
        position: usize,
        content: impl Into<String>,
        timestamp: UnixTimestamp,
    ) -> Self {
        EditOperation {
            kind: EditKind::Insert,
            position,
            content: content.into(),
            timestamp,
            author: author.into(),
        }
    }

    /// A deletion at `position`.
    ///
    /// `content` records the text the author believed they were removing.
    /// Only its length is used at apply time; see
    /// [`ReplicatedDocument::apply`](crate::ReplicatedDocument::apply).
    pub fn delete(
        author: impl Into<UserId>,
        position: usize,
        content: impl Into<String>,
        timestamp: UnixTimestamp,
    ) -> Self {
        EditOperation {
            kind: EditKind::Delete,
            position,
            content: content.into(),
            timestamp,
            author: author.into(),
        }
    }

    /// A replacement of the run at `position` with `content`.
    pub fn replace(
        author: impl Into<UserId>,
        position: usize,
        content: impl Into<String>,
        timestamp: UnixTimestamp,
    ) -> Self {
        EditOperation {
            kind: EditKind::Replace,
            position,
            content: content.into(),
            timestamp,
            author: author.into(),
        }
    }
}
