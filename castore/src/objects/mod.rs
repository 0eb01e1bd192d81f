//! This holds the types describing the immutable objects of the verso object
//! model: blobs, trees, commits and tags.
mod blob;
mod commit;
mod tag;
mod tree;

use chrono::{DateTime, Utc};

use crate::B3Digest;
pub use crate::proto::{EntryKind, ObjectType};
pub use blob::Blob;
pub use commit::Commit;
pub use tag::Tag;
pub(crate) use tree::is_valid_name;
pub use tree::{TreeEntry, TreeNode, EMPTY_TREE_DIGEST};

/// An Object is anything the [crate::objectservice::ObjectService] can hold.
/// Every object is addressed by [Object::digest].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(TreeNode),
    Commit(Commit),
    Tag(Tag),
}

impl Object {
    pub fn digest(&self) -> B3Digest {
        match self {
            Object::Blob(blob) => blob.digest().clone(),
            Object::Tree(tree) => tree.digest(),
            Object::Commit(commit) => commit.digest(),
            Object::Tag(tag) => tag.digest(),
        }
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Blob(_) => ObjectType::Blob,
            Object::Tree(_) => ObjectType::Tree,
            Object::Commit(_) => ObjectType::Commit,
            Object::Tag(_) => ObjectType::Tag,
        }
    }
}

impl From<Blob> for Object {
    fn from(value: Blob) -> Self {
        Object::Blob(value)
    }
}

impl From<TreeNode> for Object {
    fn from(value: TreeNode) -> Self {
        Object::Tree(value)
    }
}

impl From<Commit> for Object {
    fn from(value: Commit) -> Self {
        Object::Commit(value)
    }
}

impl From<Tag> for Object {
    fn from(value: Tag) -> Self {
        Object::Tag(value)
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
            ObjectType::Tag => "tag",
        }
    }
}

/// Splits a timestamp into the (seconds, nanoseconds) pair used in the wire form.
pub(crate) fn timestamp_parts(ts: &DateTime<Utc>) -> (i64, u32) {
    (ts.timestamp(), ts.timestamp_subsec_nanos())
}
