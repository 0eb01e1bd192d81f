use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::timestamp_parts;
use crate::{proto, B3Digest};

/// A Commit anchors a tree snapshot in history.
/// Its digest covers the root tree, the parent commit, the author, the
/// message and the creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// The digest of the root [crate::TreeNode].
    tree: B3Digest,
    /// The previous tip of the ref this commit was created on, if any.
    parent: Option<B3Digest>,
    author: Uuid,
    message: String,
    created_at: DateTime<Utc>,
}

impl Commit {
    pub fn new(
        tree: B3Digest,
        parent: Option<B3Digest>,
        author: Uuid,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tree,
            parent,
            author,
            message: message.into(),
            created_at,
        }
    }

    pub fn digest(&self) -> B3Digest {
        proto::Commit::from(self).digest()
    }

    pub fn tree(&self) -> &B3Digest {
        &self.tree
    }

    pub fn parent(&self) -> Option<&B3Digest> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &Uuid {
        &self.author
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }
}

impl From<&Commit> for proto::Commit {
    fn from(value: &Commit) -> Self {
        let (timestamp_seconds, timestamp_nanos) = timestamp_parts(&value.created_at);
        proto::Commit {
            tree: value.tree.clone().into(),
            parent: value.parent.clone().map(Into::into),
            author: bytes::Bytes::copy_from_slice(value.author.as_bytes()),
            message: value.message.clone(),
            timestamp_seconds,
            timestamp_nanos,
        }
    }
}
