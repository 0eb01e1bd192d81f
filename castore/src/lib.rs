#[cfg(test)]
use rstest_reuse;

mod digests;
mod errors;
mod objects;

pub mod diff;
pub mod fixtures;
pub mod objectservice;
pub mod path;
pub mod proto;
pub mod treeop;

pub use digests::{digest, B3Digest, B3_LEN};
pub use errors::{Error, ValidateTreeError};
pub use objects::{
    Blob, Commit, EntryKind, Object, ObjectType, Tag, TreeEntry, TreeNode, EMPTY_TREE_DIGEST,
};
