use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one shared document.
///
/// Document IDs are freshly generated UUIDs. The printable form is the
/// base58check encoding of the raw bytes, which keeps the IDs short,
/// URL-safe, and checksummed against copy-paste truncation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        DocumentId(Uuid::new_v4())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

/// Error returned when parsing a string which is not a valid document ID.
#[derive(Debug, thiserror::Error)]
pub enum InvalidDocumentId {
    #[error("invalid base58check string: {0}")]
    Encoding(String),
    #[error("expected 16 bytes of document id, got {0}")]
    Length(usize),
}

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .with_check(None)
            .into_vec()
            .map_err(|e| InvalidDocumentId::Encoding(e.to_string()))?;
        let uuid = Uuid::from_slice(&bytes).map_err(|_| InvalidDocumentId::Length(bytes.len()))?;
        Ok(DocumentId(uuid))
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let encoded = bs58::encode(self.0.as_bytes()).with_check().into_string();
        write!(f, "{encoded}")
    }
}

impl std::fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

impl Serialize for DocumentId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
