use std::fmt;

use crate::{AnnotationId, DocumentId, UserId};

/// A hierarchical key for storage operations.
///
/// `StorageKey` is a path-like key made of string components, supporting
/// prefix matching so a store can enumerate everything under one document.
/// The core is entirely in-memory and performs no IO of its own; these keys
/// name the records a persistence layer is expected to write when it reacts
/// to [`DocumentUpdate`](crate::DocumentUpdate) events.
///
/// Layout:
///
/// ```text
/// <document-id>/meta                      document metadata
/// <document-id>/ops/<index>               one applied operation
/// <document-id>/acl/<user-id>             one access control entry
/// <document-id>/annotations/<annotation>  one annotation
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(Vec<String>);

impl StorageKey {
    pub fn document_prefix(document_id: &DocumentId) -> StorageKey {
        StorageKey(vec![document_id.to_string()])
    }

    pub fn document_meta_path(document_id: &DocumentId) -> StorageKey {
        StorageKey(vec![document_id.to_string(), "meta".to_string()])
    }

    pub fn operation_path(document_id: &DocumentId, index: usize) -> StorageKey {
        StorageKey(vec![
            document_id.to_string(),
            "ops".to_string(),
            index.to_string(),
        ])
    }

    pub fn acl_path(document_id: &DocumentId, user_id: &UserId) -> StorageKey {
        StorageKey(vec![
            document_id.to_string(),
            "acl".to_string(),
            user_id.to_string(),
        ])
    }

    pub fn annotation_path(document_id: &DocumentId, annotation_id: &AnnotationId) -> StorageKey {
        StorageKey(vec![
            document_id.to_string(),
            "annotations".to_string(),
            annotation_id.to_string(),
        ])
    }

    pub fn from_parts(parts: &[&str]) -> Self {
        StorageKey(parts.iter().map(|s| s.to_string()).collect())
    }

    /// Checks if this key is a prefix of another key.
    pub fn is_prefix_of(&self, other: &StorageKey) -> bool {
        if self.0.len() > other.0.len() {
            return false;
        }
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a == b)
    }

    pub fn with_component(&self, component: String) -> StorageKey {
        let mut new_key = self.0.clone();
        new_key.push(component);
        StorageKey(new_key)
    }
}

impl IntoIterator for StorageKey {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StorageKey {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<String> for StorageKey {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        StorageKey(iter.into_iter().collect())
    }
}

impl<'a> From<Vec<&'a str>> for StorageKey {
    fn from(vec: Vec<&'a str>) -> Self {
        StorageKey(vec.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for StorageKey {
    fn from(vec: Vec<String>) -> Self {
        StorageKey(vec)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}
