use crate::{Blob, B3Digest, TreeEntry, TreeNode};
use lazy_static::lazy_static;

pub const HELLOWORLD_BLOB_CONTENTS: &[u8] = b"Hello World!";
pub const EMPTY_BLOB_CONTENTS: &[u8] = b"";

lazy_static! {
    pub static ref DUMMY_DIGEST: B3Digest = {
        let u: &[u8; 32] = &[
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
        ];
        u.into()
    };
    pub static ref DUMMY_DIGEST_2: B3Digest = {
        let u: &[u8; 32] = &[
            0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ];
        u.into()
    };

    // Blobs
    pub static ref HELLOWORLD_BLOB: Blob = Blob::from_contents(HELLOWORLD_BLOB_CONTENTS);
    pub static ref EMPTY_BLOB: Blob = Blob::from_contents(EMPTY_BLOB_CONTENTS);
    // 2 bytes
    pub static ref BLOB_A: Blob = Blob::from_contents(&[0x00, 0x01]);
    // 1MB
    pub static ref BLOB_B: Blob = Blob::from_contents(&(0..255).collect::<Vec<u8>>().repeat(4 * 1024));

    // Trees
    /// A tree holding a single `.keep` file.
    pub static ref TREE_A: TreeNode = {
        let mut tree = TreeNode::new();
        tree.upsert(TreeEntry::blob(".keep", EMPTY_BLOB.digest().clone()).expect("valid name"));
        tree
    };
    /// A tree holding [TREE_A] as `keep`, and a `hello.txt` file.
    pub static ref TREE_B: TreeNode = {
        let mut tree = TreeNode::new();
        tree.upsert(TreeEntry::tree("keep", TREE_A.digest()).expect("valid name"));
        tree.upsert(TreeEntry::blob("hello.txt", HELLOWORLD_BLOB.digest().clone()).expect("valid name"));
        tree
    };
}
