use chrono::{DateTime, Utc};

use crate::{digests, B3Digest};

/// A Blob references the contents of a single file.
/// The contents themselves live outside of the object model, the blob only
/// records their digest and size. Its digest is the digest of the contents,
/// so the creation time doesn't take part in its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    digest: B3Digest,
    size: u64,
    created_at: DateTime<Utc>,
}

impl Blob {
    pub fn new(digest: B3Digest, size: u64) -> Self {
        Self {
            digest,
            size,
            created_at: Utc::now(),
        }
    }

    /// Constructs a Blob describing the given contents.
    pub fn from_contents(contents: &[u8]) -> Self {
        Self::new(digests::digest(contents), contents.len() as u64)
    }

    pub fn digest(&self) -> &B3Digest {
        &self.digest
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }
}
