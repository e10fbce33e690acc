use crate::{AnnotationId, AnnotationReply, DocumentAnnotation, EditKind, EditOperation};

/// The replicated state of one document: its text, the append-only log of
/// applied operations, and its annotations.
///
/// Operations are applied strictly in call order. That order *is* the
/// document's total order: this is an in-process ordering authority, not a
/// commutative merge of independently diverging replicas. For several
/// processes to converge on the same document, a transport must funnel all
/// of their edits through one `ReplicatedDocument` instance.
///
/// ## Position handling
///
/// Operation positions are character offsets and are clamped into
/// `[0, char_count]` at apply time rather than rejected. Clamping on
/// character boundaries means an out-of-range offset into multi-byte text
/// can never split a code point.
///
/// A delete removes a run whose length is taken from the operation's
/// recorded `content`; the live text at that position is not compared
/// against it. An author deleting against a stale view of the document will
/// therefore remove whatever currently occupies that run. This is a known
/// consequence of positional addressing without per-character identities and
/// is part of the observable contract.
#[derive(Debug, Clone)]
pub struct ReplicatedDocument {
    content: String,
    operations: Vec<EditOperation>,
    annotations: Vec<DocumentAnnotation>,
}

impl ReplicatedDocument {
    pub fn new(content: impl Into<String>) -> Self {
        ReplicatedDocument {
            content: content.into(),
            operations: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Applies `op` to the document text and appends it to the log.
    ///
    /// Never fails: positions are clamped, and a delete or replace which
    /// overruns the end of the text truncates at the end.
    pub fn apply(&mut self, op: EditOperation) {
        let start = byte_offset_clamped(&self.content, op.position);
        match op.kind {
            EditKind::Insert => {
                self.content.insert_str(start, &op.content);
            }
            EditKind::Delete => {
                let end = run_end(&self.content, start, op.content.chars().count());
                self.content.replace_range(start..end, "");
            }
            EditKind::Replace => {
                let end = run_end(&self.content, start, op.content.chars().count());
                self.content.replace_range(start..end, &op.content);
            }
        }
        tracing::trace!(kind = op.kind.as_str(), position = op.position, "applied operation");
        self.operations.push(op);
    }

    pub fn add_annotation(&mut self, annotation: DocumentAnnotation) {
        self.annotations.push(annotation);
    }

    pub fn add_reply(&mut self, annotation_id: &AnnotationId, reply: AnnotationReply) -> bool {
        match self.annotations.iter_mut().find(|a| a.id == *annotation_id) {
            Some(annotation) => {
                annotation.push_reply(reply);
                true
            }
            None => false,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The operations applied so far, in application order. Denied edit
    /// attempts never reach the replica and so never appear here.
    pub fn history(&self) -> &[EditOperation] {
        &self.operations
    }

    pub fn annotations(&self) -> &[DocumentAnnotation] {
        &self.annotations
    }
}

/// Byte offset of the character at `char_pos`, clamped to the end of `s`.
fn byte_offset_clamped(s: &str, char_pos: usize) -> usize {
    s.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Byte offset of the end of a `run_chars`-character run starting at byte
/// offset `start`, clamped to the end of `s`.
fn run_end(s: &str, start: usize, run_chars: usize) -> usize {
    s[start..]
        .char_indices()
        .nth(run_chars)
        .map(|(i, _)| start + i)
        .unwrap_or(s.len())
}
