use lazy_static::lazy_static;

use crate::{proto, B3Digest, EntryKind, ValidateTreeError};

lazy_static! {
    /// The digest of the tree without any entries.
    pub static ref EMPTY_TREE_DIGEST: B3Digest = TreeNode::new().digest();
}

/// A TreeEntry is one named child of a [TreeNode], pointing to either a blob
/// or another tree by its digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    name: String,
    kind: EntryKind,
    digest: B3Digest,
}

impl TreeEntry {
    pub fn new(
        name: impl Into<String>,
        kind: EntryKind,
        digest: B3Digest,
    ) -> Result<Self, ValidateTreeError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(ValidateTreeError::InvalidName(name));
        }
        Ok(Self { name, kind, digest })
    }

    pub fn blob(name: impl Into<String>, digest: B3Digest) -> Result<Self, ValidateTreeError> {
        Self::new(name, EntryKind::Blob, digest)
    }

    pub fn tree(name: impl Into<String>, digest: B3Digest) -> Result<Self, ValidateTreeError> {
        Self::new(name, EntryKind::Tree, digest)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn digest(&self) -> &B3Digest {
        &self.digest
    }

    pub fn is_tree(&self) -> bool {
        self.kind == EntryKind::Tree
    }
}

/// Checks a name for validity as a tree entry.
/// We disallow slashes, null bytes, '.', '..' and the empty string.
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != ".." && name != "." && !name.contains(['\0', '/'])
}

/// A TreeNode is a snapshot of a directory.
/// Its entries are kept sorted by name, and names are unique, so the digest
/// only depends on the set of entries, never on the order they were added in.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    entries: Vec<TreeEntry>,
}

impl TreeNode {
    pub fn new() -> Self {
        TreeNode { entries: vec![] }
    }

    /// Calculates the digest of a TreeNode, see [proto::TreeNode::digest].
    pub fn digest(&self) -> B3Digest {
        proto::TreeNode::from(self).digest()
    }

    /// Allows iterating over all entries, ordered by their name.
    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> + Send + Sync + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the entry with the given name.
    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.position(name).ok().map(|pos| &self.entries[pos])
    }

    /// Inserts the entry, replacing an existing entry with the same name.
    /// Returns the replaced entry, if any.
    pub fn upsert(&mut self, entry: TreeEntry) -> Option<TreeEntry> {
        match self.position(entry.name()) {
            Ok(pos) => Some(std::mem::replace(&mut self.entries[pos], entry)),
            Err(pos) => {
                self.entries.insert(pos, entry);
                None
            }
        }
    }

    /// Removes the entry with the given name, returning it.
    pub fn remove(&mut self, name: &str) -> Option<TreeEntry> {
        self.position(name)
            .ok()
            .map(|pos| self.entries.remove(pos))
    }

    // This relies on self.entries being sorted, which holds as entries can
    // only be added through upsert.
    fn position(&self, name: &str) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|entry| entry.name.as_str().cmp(name))
    }
}

impl From<&TreeNode> for proto::TreeNode {
    fn from(value: &TreeNode) -> Self {
        proto::TreeNode {
            entries: value
                .entries
                .iter()
                .map(|entry| proto::TreeEntry {
                    name: entry.name.clone(),
                    kind: entry.kind.into(),
                    digest: entry.digest.clone().into(),
                })
                .collect(),
        }
    }
}

impl TryFrom<proto::TreeNode> for TreeNode {
    type Error = ValidateTreeError;

    fn try_from(value: proto::TreeNode) -> Result<Self, Self::Error> {
        let mut entries: Vec<TreeEntry> = Vec::with_capacity(value.entries.len());

        for entry in value.entries {
            let kind = EntryKind::try_from(entry.kind)
                .map_err(|_| ValidateTreeError::InvalidKind(entry.name.clone(), entry.kind))?;
            let digest_len = entry.digest.len();
            let digest = B3Digest::try_from(entry.digest)
                .map_err(|_| ValidateTreeError::InvalidDigestLen(entry.name.clone(), digest_len))?;

            // names must be strictly increasing, which also rules out duplicates.
            if let Some(prev) = entries.last() {
                match prev.name.as_str().cmp(&entry.name) {
                    std::cmp::Ordering::Less => {}
                    std::cmp::Ordering::Equal => {
                        return Err(ValidateTreeError::DuplicateName(entry.name))
                    }
                    std::cmp::Ordering::Greater => {
                        return Err(ValidateTreeError::WrongSorting(entry.name))
                    }
                }
            }

            entries.push(TreeEntry::new(entry.name, kind, digest)?);
        }

        Ok(TreeNode { entries })
    }
}

#[cfg(test)]
mod test {
    use super::{TreeEntry, TreeNode, EMPTY_TREE_DIGEST};
    use crate::fixtures::{DUMMY_DIGEST, DUMMY_DIGEST_2};
    use crate::{proto, ValidateTreeError};

    #[test]
    fn empty_tree_digest() {
        assert_eq!(*EMPTY_TREE_DIGEST, TreeNode::new().digest());
        assert_eq!(*EMPTY_TREE_DIGEST, TreeNode::default().digest());
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let mut t1 = TreeNode::new();
        t1.upsert(TreeEntry::blob("b", DUMMY_DIGEST.clone()).unwrap());
        t1.upsert(TreeEntry::tree("a", DUMMY_DIGEST_2.clone()).unwrap());
        t1.upsert(TreeEntry::blob("z", DUMMY_DIGEST.clone()).unwrap());

        let mut t2 = TreeNode::new();
        t2.upsert(TreeEntry::blob("z", DUMMY_DIGEST.clone()).unwrap());
        t2.upsert(TreeEntry::blob("b", DUMMY_DIGEST.clone()).unwrap());
        t2.upsert(TreeEntry::tree("a", DUMMY_DIGEST_2.clone()).unwrap());

        assert_eq!(t1, t2);
        assert_eq!(t1.digest(), t2.digest());
        assert_eq!(
            vec!["a", "b", "z"],
            t1.entries().map(|e| e.name()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn upsert_replaces() {
        let mut t = TreeNode::new();
        assert!(t
            .upsert(TreeEntry::blob("a", DUMMY_DIGEST.clone()).unwrap())
            .is_none());
        let replaced = t
            .upsert(TreeEntry::blob("a", DUMMY_DIGEST_2.clone()).unwrap())
            .expect("must replace");

        assert_eq!(&*DUMMY_DIGEST, replaced.digest());
        assert_eq!(1, t.len());
        assert_eq!(&*DUMMY_DIGEST_2, t.get("a").unwrap().digest());
    }

    #[test]
    fn remove_entry() {
        let mut t = TreeNode::new();
        t.upsert(TreeEntry::blob("a", DUMMY_DIGEST.clone()).unwrap());

        assert!(t.remove("b").is_none());
        assert!(t.remove("a").is_some());
        assert!(t.is_empty());
        assert_eq!(*EMPTY_TREE_DIGEST, t.digest());
    }

    #[test]
    fn reject_invalid_names() {
        for name in ["", ".", "..", "a/b", "a\0b"] {
            assert_eq!(
                Err(ValidateTreeError::InvalidName(name.to_string())),
                TreeEntry::blob(name, DUMMY_DIGEST.clone()),
            );
        }
    }

    #[test]
    fn proto_roundtrip() {
        let mut t = TreeNode::new();
        t.upsert(TreeEntry::blob("b", DUMMY_DIGEST.clone()).unwrap());
        t.upsert(TreeEntry::tree("a", DUMMY_DIGEST_2.clone()).unwrap());

        let p = proto::TreeNode::from(&t);
        assert_eq!(p.digest(), t.digest());
        assert_eq!(Ok(t), TreeNode::try_from(p));
    }

    #[test]
    fn proto_reject_unsorted() {
        let mut p = proto::TreeNode::from(&TreeNode::new());
        for name in ["b", "a"] {
            p.entries.push(proto::TreeEntry {
                name: name.into(),
                kind: 0,
                digest: DUMMY_DIGEST.clone().into(),
            });
        }

        assert_eq!(
            Err(ValidateTreeError::WrongSorting("a".into())),
            TreeNode::try_from(p)
        );
    }

    #[test]
    fn proto_reject_duplicate() {
        let entry = proto::TreeEntry {
            name: "a".into(),
            kind: 1,
            digest: DUMMY_DIGEST.clone().into(),
        };
        let p = proto::TreeNode {
            entries: vec![entry.clone(), entry],
        };

        assert_eq!(
            "\"a\" is a duplicate name",
            TreeNode::try_from(p).expect_err("must fail").to_string()
        );
    }

    #[test]
    fn proto_reject_bad_digest() {
        let p = proto::TreeNode {
            entries: vec![proto::TreeEntry {
                name: "a".into(),
                kind: 0,
                digest: vec![0x01, 0x02].into(),
            }],
        };

        assert_eq!(
            Err(ValidateTreeError::InvalidDigestLen("a".into(), 2)),
            TreeNode::try_from(p)
        );
    }
}
