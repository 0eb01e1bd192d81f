//! Canonical wire form of the objects that are addressed by the digest of
//! their serialization (trees, commits, tags).
//!
//! prost emits fields in tag order and repeated fields in vector order, so as
//! long as tree entries are kept sorted by name, two equal objects always
//! encode to the same bytes.
use bytes::Bytes;
use prost::Message;

use crate::B3Digest;

/// The type of an object in the store.
/// The discriminant is also used as a one-byte prefix when digesting an
/// encoded object, so objects of different types never share a digest
/// through equal encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ObjectType {
    Blob = 0,
    Tree = 1,
    Commit = 2,
    Tag = 3,
}

/// The child type of a [TreeEntry].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum EntryKind {
    Blob = 0,
    Tree = 1,
}

#[derive(Clone, PartialEq, Message)]
pub struct TreeEntry {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(enumeration = "EntryKind", tag = "2")]
    pub kind: i32,
    #[prost(bytes = "bytes", tag = "3")]
    pub digest: Bytes,
}

#[derive(Clone, PartialEq, Message)]
pub struct TreeNode {
    #[prost(message, repeated, tag = "1")]
    pub entries: Vec<TreeEntry>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Commit {
    #[prost(bytes = "bytes", tag = "1")]
    pub tree: Bytes,
    #[prost(bytes = "bytes", optional, tag = "2")]
    pub parent: Option<Bytes>,
    #[prost(bytes = "bytes", tag = "3")]
    pub author: Bytes,
    #[prost(string, tag = "4")]
    pub message: String,
    #[prost(int64, tag = "5")]
    pub timestamp_seconds: i64,
    #[prost(uint32, tag = "6")]
    pub timestamp_nanos: u32,
}

#[derive(Clone, PartialEq, Message)]
pub struct Tag {
    #[prost(bytes = "bytes", tag = "1")]
    pub repository_id: Bytes,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(bytes = "bytes", tag = "3")]
    pub target: Bytes,
    #[prost(enumeration = "ObjectType", tag = "4")]
    pub target_type: i32,
    #[prost(bytes = "bytes", tag = "5")]
    pub tagger: Bytes,
    #[prost(string, tag = "6")]
    pub message: String,
    #[prost(int64, tag = "7")]
    pub timestamp_seconds: i64,
    #[prost(uint32, tag = "8")]
    pub timestamp_nanos: u32,
}

/// Digests the type prefix followed by the encoded message.
fn typed_digest(object_type: ObjectType, message: &impl Message) -> B3Digest {
    let mut hasher = blake3::Hasher::new();

    hasher
        .update(&[object_type as u8])
        .update(&message.encode_to_vec())
        .finalize()
        .into()
}

impl TreeNode {
    /// Calculates the digest of a TreeNode, which is the blake3 hash of the
    /// tree type prefix and the message serialized in canonical form.
    pub fn digest(&self) -> B3Digest {
        typed_digest(ObjectType::Tree, self)
    }
}

impl Commit {
    pub fn digest(&self) -> B3Digest {
        typed_digest(ObjectType::Commit, self)
    }
}

impl Tag {
    pub fn digest(&self) -> B3Digest {
        typed_digest(ObjectType::Tag, self)
    }
}

#[cfg(test)]
mod tests {
    use super::{Commit, TreeEntry, TreeNode};
    use prost::Message;

    #[test]
    fn empty_tree_encodes_to_nothing() {
        assert!(TreeNode::default().encode_to_vec().is_empty());
    }

    #[test]
    fn empty_tree_and_empty_commit_differ() {
        // both encode to zero bytes, the type prefix keeps them apart.
        assert!(Commit::default().encode_to_vec().is_empty());
        assert_ne!(TreeNode::default().digest(), Commit::default().digest());
    }

    #[test]
    fn entry_order_changes_digest() {
        let a = TreeEntry {
            name: "a".into(),
            kind: 0,
            digest: vec![0u8; 32].into(),
        };
        let b = TreeEntry {
            name: "b".into(),
            kind: 0,
            digest: vec![0u8; 32].into(),
        };

        let ab = TreeNode {
            entries: vec![a.clone(), b.clone()],
        };
        let ba = TreeNode {
            entries: vec![b, a],
        };
        assert_ne!(ab.digest(), ba.digest());
    }
}
