//! Structural comparison of two trees.
use itertools::{EitherOrBoth, Itertools};
use tracing::{instrument, trace};

use crate::objectservice::ObjectService;
use crate::{path, B3Digest, Error, TreeEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::Modified => "modified",
        })
    }
}

/// One difference between two trees.
/// Added and removed subtrees are reported as a single change at their root
/// path, they're not expanded into their leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub path: String,
    pub kind: ChangeKind,
    /// The digest of the entry in the base tree, if it exists there.
    pub before: Option<B3Digest>,
    /// The digest of the entry in the merge tree, if it exists there.
    pub after: Option<B3Digest>,
}

impl Change {
    fn added(path: String, entry: &TreeEntry) -> Self {
        Self {
            path,
            kind: ChangeKind::Added,
            before: None,
            after: Some(entry.digest().clone()),
        }
    }

    fn removed(path: String, entry: &TreeEntry) -> Self {
        Self {
            path,
            kind: ChangeKind::Removed,
            before: Some(entry.digest().clone()),
            after: None,
        }
    }

    fn modified(path: String, before: &TreeEntry, after: &TreeEntry) -> Self {
        Self {
            path,
            kind: ChangeKind::Modified,
            before: Some(before.digest().clone()),
            after: Some(after.digest().clone()),
        }
    }
}

impl std::fmt::Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.path)
    }
}

/// Compares the trees with the given digests, and returns the changes needed
/// to get from `base` to `merge`, ordered by path.
///
/// Subtrees with equal digests are skipped without being loaded, so the cost
/// is proportional to the size of the difference, not the size of the trees.
/// The first error aborts the comparison, no partial result is returned.
#[instrument(skip(object_service), fields(%base, %merge))]
pub async fn diff_tree<OS>(
    object_service: &OS,
    base: &B3Digest,
    merge: &B3Digest,
) -> Result<Vec<Change>, Error>
where
    OS: ObjectService + ?Sized,
{
    let mut changes = vec![];

    // (path prefix, base tree, merge tree) still to be compared.
    let mut worklist: Vec<(String, B3Digest, B3Digest)> =
        vec![(String::new(), base.clone(), merge.clone())];

    while let Some((prefix, base_digest, merge_digest)) = worklist.pop() {
        if base_digest == merge_digest {
            trace!(prefix, "identical subtree");
            continue;
        }

        let base_tree = object_service.get_tree(&base_digest).await?;
        let merge_tree = object_service.get_tree(&merge_digest).await?;

        // both entry lists are sorted by name, so one merge pass pairs them up.
        for pair in base_tree
            .entries()
            .merge_join_by(merge_tree.entries(), |a, b| a.name().cmp(b.name()))
        {
            match pair {
                EitherOrBoth::Left(a) => {
                    changes.push(Change::removed(path::join(&prefix, a.name()), a))
                }
                EitherOrBoth::Right(b) => {
                    changes.push(Change::added(path::join(&prefix, b.name()), b))
                }
                EitherOrBoth::Both(a, b) => {
                    if a.digest() == b.digest() && a.kind() == b.kind() {
                        continue;
                    }

                    let path = path::join(&prefix, a.name());
                    if a.is_tree() && b.is_tree() {
                        worklist.push((path, a.digest().clone(), b.digest().clone()));
                    } else {
                        // blob changes, and blob/tree type changes.
                        changes.push(Change::modified(path, a, b));
                    }
                }
            }
        }
    }

    changes.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(changes)
}
