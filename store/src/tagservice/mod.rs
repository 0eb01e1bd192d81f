use async_trait::async_trait;
use uuid::Uuid;
use verso_castore::{B3Digest, Error, Tag};

mod from_addr;
mod memory;

pub use self::from_addr::from_addr;
pub use self::memory::MemoryTagService;

/// The base trait all Tag services need to implement.
/// A tag service is bound to a single repository, and only holds tags of
/// that repository.
#[async_trait]
pub trait TagService: Send + Sync {
    /// The repository this service holds tags for.
    fn repository_id(&self) -> Uuid;

    /// Stores a tag, and returns its digest.
    /// Fails with [Error::IdentityMismatch] if the tag belongs to another
    /// repository.
    async fn insert(&self, tag: Tag) -> Result<B3Digest, Error>;

    /// Looks up a tag by its digest.
    async fn get(&self, digest: &B3Digest) -> Result<Option<Tag>, Error>;
}

#[async_trait]
impl<A> TagService for A
where
    A: AsRef<dyn TagService> + Send + Sync,
{
    fn repository_id(&self) -> Uuid {
        self.as_ref().repository_id()
    }

    async fn insert(&self, tag: Tag) -> Result<B3Digest, Error> {
        self.as_ref().insert(tag).await
    }

    async fn get(&self, digest: &B3Digest) -> Result<Option<Tag>, Error> {
        self.as_ref().get(digest).await
    }
}
