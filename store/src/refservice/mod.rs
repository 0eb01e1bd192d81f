use async_trait::async_trait;
use uuid::Uuid;
use verso_castore::{B3Digest, Error};

mod from_addr;
mod memory;
#[cfg(test)]
mod tests;

pub use self::from_addr::from_addr;
pub use self::memory::MemoryRefService;

/// A named, mutable pointer to the tip commit of a line of history, inside
/// one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ref {
    pub id: Uuid,
    pub repository_id: Uuid,
    pub name: String,
    /// The commit this ref currently points to.
    /// A ref without a tip gets a root commit on its first commit.
    pub commit: Option<B3Digest>,
}

impl Ref {
    /// Creates a new ref without a tip, with a fresh id.
    pub fn new(repository_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            repository_id,
            name: name.into(),
            commit: None,
        }
    }
}

/// The base trait all Ref services need to implement.
///
/// Refs are the only mutable piece of history, so moving them is done with
/// [RefService::compare_and_set], never with a plain overwrite.
#[async_trait]
pub trait RefService: Send + Sync {
    /// Looks up a ref by its id.
    async fn get(&self, id: &Uuid) -> Result<Option<Ref>, Error>;

    /// Looks up a ref by its name inside a repository.
    async fn get_by_name(&self, repository_id: &Uuid, name: &str) -> Result<Option<Ref>, Error>;

    /// Stores a new ref.
    /// Fails with [Error::Conflict] if a ref with the same id, or with the same
    /// name in the same repository, already exists.
    async fn insert(&self, new_ref: Ref) -> Result<Ref, Error>;

    /// Moves the ref to `new`, but only if it currently points to `expected`.
    /// Returns the updated ref.
    ///
    /// Fails with [Error::NotFound] if there's no such ref, and with
    /// [Error::Conflict] if the ref moved since `expected` was observed.
    async fn compare_and_set(
        &self,
        id: &Uuid,
        expected: Option<&B3Digest>,
        new: B3Digest,
    ) -> Result<Ref, Error>;
}

#[async_trait]
impl<A> RefService for A
where
    A: AsRef<dyn RefService> + Send + Sync,
{
    async fn get(&self, id: &Uuid) -> Result<Option<Ref>, Error> {
        self.as_ref().get(id).await
    }

    async fn get_by_name(&self, repository_id: &Uuid, name: &str) -> Result<Option<Ref>, Error> {
        self.as_ref().get_by_name(repository_id, name).await
    }

    async fn insert(&self, new_ref: Ref) -> Result<Ref, Error> {
        self.as_ref().insert(new_ref).await
    }

    async fn compare_and_set(
        &self,
        id: &Uuid,
        expected: Option<&B3Digest>,
        new: B3Digest,
    ) -> Result<Ref, Error> {
        self.as_ref().compare_and_set(id, expected, new).await
    }
}
