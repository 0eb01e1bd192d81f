//! Copy-on-write updates of the tree namespace.
//!
//! Trees are never modified in place. Changing a leaf rebuilds the trees on
//! the path from the root down to that leaf, every other subtree keeps being
//! referenced by its digest.
use tracing::{debug, instrument};

use crate::objectservice::ObjectService;
use crate::{path, Blob, Error, TreeEntry, TreeNode};

/// Builds new trees on top of the trees stored in an [ObjectService].
pub struct TreeOp<OS> {
    object_service: OS,
}

impl<OS> TreeOp<OS>
where
    OS: ObjectService,
{
    pub fn new(object_service: OS) -> Self {
        Self { object_service }
    }

    /// The tree to start from in a repository without any content.
    pub fn empty_root() -> TreeNode {
        TreeNode::new()
    }

    /// Inserts (or overwrites) the blob at the given path, creating
    /// intermediate trees as needed, and returns the new root.
    ///
    /// Fails with [Error::InvalidPath] if an intermediate component exists,
    /// but is a blob.
    #[instrument(skip(self, root, blob), fields(root.digest = %root.digest(), blob.digest = %blob.digest()))]
    pub async fn add_leaf(&self, root: &TreeNode, path: &str, blob: &Blob) -> Result<TreeNode, Error> {
        let components = path::components(path)?;
        let Some((leaf_name, dir_names)) = components.split_last() else {
            return Err(Error::invalid_path(path, "path is empty"));
        };

        // chain[i] is the tree the i-th directory component lives in.
        let mut chain = self.load_chain(root, path, dir_names, true).await?;

        self.object_service.put(blob.clone().into()).await?;

        let mut node = chain.pop().unwrap_or_default();
        node.upsert(TreeEntry::blob(*leaf_name, blob.digest().clone())?);

        for (name, mut parent) in dir_names.iter().rev().zip(chain.into_iter().rev()) {
            let digest = self.object_service.put(node.into()).await?;
            parent.upsert(TreeEntry::tree(*name, digest)?);
            node = parent;
        }

        let root_digest = self.object_service.put(node.clone().into()).await?;
        debug!(%root_digest, "rebuilt tree");

        Ok(node)
    }

    /// Removes the entry at the given path (a blob, or a whole subtree) and
    /// returns the new root. Trees left empty by the removal are dropped from
    /// their parent.
    ///
    /// Fails with [Error::NotFound] if there's nothing at that path.
    #[instrument(skip(self, root), fields(root.digest = %root.digest()))]
    pub async fn remove_leaf(&self, root: &TreeNode, path: &str) -> Result<TreeNode, Error> {
        let components = path::components(path)?;
        let Some((leaf_name, dir_names)) = components.split_last() else {
            return Err(Error::invalid_path(path, "path is empty"));
        };

        let mut chain = self.load_chain(root, path, dir_names, false).await?;

        let mut node = chain.pop().unwrap_or_default();
        if node.remove(leaf_name).is_none() {
            return Err(Error::NotFound(format!("path {}", path)));
        }

        for (name, mut parent) in dir_names.iter().rev().zip(chain.into_iter().rev()) {
            if node.is_empty() {
                parent.remove(name);
            } else {
                let digest = self.object_service.put(node.into()).await?;
                parent.upsert(TreeEntry::tree(*name, digest)?);
            }
            node = parent;
        }

        let root_digest = self.object_service.put(node.clone().into()).await?;
        debug!(%root_digest, "rebuilt tree");

        Ok(node)
    }

    /// Looks up the entry at the given path.
    /// Returns Ok(None) if the path doesn't exist, or can't be reached because
    /// one of its components is a blob.
    #[instrument(skip(self, root), fields(root.digest = %root.digest()))]
    pub async fn find_entry(&self, root: &TreeNode, path: &str) -> Result<Option<TreeEntry>, Error> {
        let components = path::components(path)?;
        let Some((leaf_name, dir_names)) = components.split_last() else {
            return Err(Error::invalid_path(path, "path is empty"));
        };

        let mut current = root.clone();
        for name in dir_names {
            match current.get(name) {
                Some(entry) if entry.is_tree() => {
                    // a dangling reference is a store inconsistency, bail out.
                    current = self.object_service.get_tree(entry.digest()).await?;
                }
                // either missing, or a blob we can't descend into.
                _ => return Ok(None),
            }
        }

        Ok(current.get(leaf_name).cloned())
    }

    /// Loads the trees along `dir_names`, starting with (a copy of) the root.
    /// The returned chain has one more element than `dir_names`, its last
    /// element is the tree the leaf lives in.
    /// Missing trees are substituted by empty ones if `create` is set, and
    /// are reported as [Error::NotFound] otherwise.
    async fn load_chain(
        &self,
        root: &TreeNode,
        path: &str,
        dir_names: &[&str],
        create: bool,
    ) -> Result<Vec<TreeNode>, Error> {
        let mut chain = Vec::with_capacity(dir_names.len() + 1);
        chain.push(root.clone());

        for (depth, name) in dir_names.iter().enumerate() {
            let parent = &chain[depth];
            let child = match parent.get(name) {
                Some(entry) if entry.is_tree() => {
                    self.object_service.get_tree(entry.digest()).await?
                }
                Some(_) => {
                    return Err(Error::invalid_path(
                        path,
                        format!("{} is a blob", dir_names[..=depth].join("/")),
                    ))
                }
                None if create => TreeNode::new(),
                None => return Err(Error::NotFound(format!("path {}", path))),
            };
            chain.push(child);
        }

        Ok(chain)
    }
}
