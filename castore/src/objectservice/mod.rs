use async_trait::async_trait;
use tracing::warn;

use crate::{B3Digest, Commit, Error, Object, TreeNode, EMPTY_TREE_DIGEST};

mod from_addr;
mod memory;
#[cfg(test)]
mod tests;

pub use self::from_addr::from_addr;
pub use self::memory::MemoryObjectService;

/// The base trait all Object services need to implement.
/// This is a simple get and put of [Object], keyed by their digest.
///
/// Objects are immutable and write-once: putting an object that already
/// exists is not an error, and must not change what `get` returns.
#[async_trait]
pub trait ObjectService: Send + Sync {
    /// Looks up a single object by its digest.
    /// In case the object is not found, Ok(None) is returned.
    async fn get(&self, digest: &B3Digest) -> Result<Option<Object>, Error>;

    /// Uploads a single object, and returns its digest.
    async fn put(&self, object: Object) -> Result<B3Digest, Error>;

    /// Checks whether an object with the given digest exists.
    async fn has(&self, digest: &B3Digest) -> Result<bool, Error> {
        Ok(self.get(digest).await?.is_some())
    }

    /// Looks up a tree by its digest.
    /// The empty tree is always available, whether it was put or not.
    /// Returns [Error::NotFound] if there's no such object, and
    /// [Error::StorageError] if the object is not a tree.
    async fn get_tree(&self, digest: &B3Digest) -> Result<TreeNode, Error> {
        if *digest == *EMPTY_TREE_DIGEST {
            return Ok(TreeNode::new());
        }

        match self.get(digest).await? {
            Some(Object::Tree(tree)) => Ok(tree),
            Some(other) => {
                warn!(%digest, object_type = %other.object_type(), "expected a tree");
                Err(Error::StorageError(format!(
                    "object {} is a {}, not a tree",
                    digest,
                    other.object_type()
                )))
            }
            None => Err(Error::NotFound(format!("tree {}", digest))),
        }
    }

    /// Looks up a commit by its digest.
    /// Returns [Error::NotFound] if there's no such object, and
    /// [Error::StorageError] if the object is not a commit.
    async fn get_commit(&self, digest: &B3Digest) -> Result<Commit, Error> {
        match self.get(digest).await? {
            Some(Object::Commit(commit)) => Ok(commit),
            Some(other) => {
                warn!(%digest, object_type = %other.object_type(), "expected a commit");
                Err(Error::StorageError(format!(
                    "object {} is a {}, not a commit",
                    digest,
                    other.object_type()
                )))
            }
            None => Err(Error::NotFound(format!("commit {}", digest))),
        }
    }
}

#[async_trait]
impl<A> ObjectService for A
where
    A: AsRef<dyn ObjectService> + Send + Sync,
{
    async fn get(&self, digest: &B3Digest) -> Result<Option<Object>, Error> {
        self.as_ref().get(digest).await
    }

    async fn put(&self, object: Object) -> Result<B3Digest, Error> {
        self.as_ref().put(object).await
    }

    async fn has(&self, digest: &B3Digest) -> Result<bool, Error> {
        self.as_ref().has(digest).await
    }
}
