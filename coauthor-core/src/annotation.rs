use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{UnixTimestamp, UserId};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(Uuid);

impl AnnotationId {
    pub fn new() -> Self {
        AnnotationId(Uuid::new_v4())
    }
}

impl Default for AnnotationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for AnnotationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "annotation:{}", self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplyId(Uuid);

impl ReplyId {
    pub fn new() -> Self {
        ReplyId(Uuid::new_v4())
    }
}

impl Default for ReplyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReplyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for ReplyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "reply:{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Comment,
    Highlight,
    Suggestion,
    Drawing,
}

impl AnnotationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationKind::Comment => "comment",
            AnnotationKind::Highlight => "highlight",
            AnnotationKind::Suggestion => "suggestion",
            AnnotationKind::Drawing => "drawing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationReply {
    pub id: ReplyId,
    pub author: UserId,
    pub created_at: UnixTimestamp,
    pub content: String,
}

impl AnnotationReply {
    pub fn new(
        author: impl Into<UserId>,
        content: impl Into<String>,
        created_at: UnixTimestamp,
    ) -> Self {
        AnnotationReply {
            id: ReplyId::new(),
            author: author.into(),
            created_at,
            content: content.into(),
        }
    }
}

/// A comment, highlight, suggestion or drawing anchored to a position in a
/// document.
///
/// The anchor is the character offset the annotation was created at and is
/// never shifted by later edits. An annotation on "Hello" at position 0 stays
/// at position 0 even if text is inserted before it. This is a documented
/// limitation of the positional anchoring scheme, not something callers
/// should try to compensate for; re-anchoring would need per-character
/// identities, which this core deliberately does not have.
///
/// Annotations are never removed once added. Replies only accumulate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnnotation {
    pub id: AnnotationId,
    pub author: UserId,
    pub created_at: UnixTimestamp,
    pub kind: AnnotationKind,
    pub position: usize,
    pub content: String,
    pub replies: Vec<AnnotationReply>,
}

impl DocumentAnnotation {
    pub fn new(
        author: impl Into<UserId>,
        kind: AnnotationKind,
        position: usize,
        content: impl Into<String>,
        created_at: UnixTimestamp,
    ) -> Self {
        DocumentAnnotation {
            id: AnnotationId::new(),
            author: author.into(),
            created_at,
            kind,
            position,
            content: content.into(),
            replies: Vec::new(),
        }
    }

    pub(crate) fn push_reply(&mut self, reply: AnnotationReply) {
        self.replies.push(reply);
    }
}
