//! Represents an object (blob) stored in a container.

use super::{metadata::Metadata, ordered::Named};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A single object within a container.
///
/// Content is opaque to the storage model; the ETag is the lowercase MD5 hex
/// digest of the content and is recomputed whenever the content is replaced.
#[derive(Debug, Clone)]
pub struct Object {
    /// Object name, unique within its container. May contain `/`.
    pub name: String,

    /// Raw content bytes.
    pub content: Bytes,

    /// MD5 hex digest of `content`.
    pub etag: String,

    /// Version token, regenerated on every write of the content.
    pub version_id: String,

    /// When the content was last written.
    pub last_modified: DateTime<Utc>,

    pub metadata: Metadata,
}

impl Object {
    pub fn new(name: impl Into<String>, content: Bytes) -> Self {
        let etag = content_etag(&content);
        Self {
            name: name.into(),
            content,
            etag,
            version_id: Uuid::new_v4().simple().to_string(),
            last_modified: Utc::now(),
            metadata: Metadata::new(),
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

impl Named for Object {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Lowercase MD5 hex digest used as the object ETag.
pub fn content_etag(content: &[u8]) -> String {
    format!("{:x}", md5::compute(content))
}
