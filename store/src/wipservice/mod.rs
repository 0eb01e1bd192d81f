use async_trait::async_trait;
use uuid::Uuid;
use verso_castore::{B3Digest, Error};

mod from_addr;
mod memory;

pub use self::from_addr::from_addr;
pub use self::memory::MemoryWipService;

/// A working state holds a staged, not yet committed root tree for one ref.
/// Committing it doesn't consume it, it keeps existing afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingState {
    pub id: Uuid,
    pub repository_id: Uuid,
    /// The ref this working state gets committed to.
    pub ref_id: Uuid,
    /// The staged root tree.
    pub current_tree: B3Digest,
    /// The root tree the staging started from.
    pub parent_tree: B3Digest,
}

impl WorkingState {
    /// Creates a new working state with a fresh id, staging on top of
    /// `base_tree`.
    pub fn new(repository_id: Uuid, ref_id: Uuid, base_tree: B3Digest) -> Self {
        Self {
            id: Uuid::new_v4(),
            repository_id,
            ref_id,
            current_tree: base_tree.clone(),
            parent_tree: base_tree,
        }
    }
}

/// The base trait all working state services need to implement.
#[async_trait]
pub trait WipService: Send + Sync {
    /// Looks up a working state by its id.
    async fn get(&self, id: &Uuid) -> Result<Option<WorkingState>, Error>;

    /// Stores a new working state.
    /// Fails with [Error::Conflict] if one with the same id already exists.
    async fn insert(&self, working_state: WorkingState) -> Result<WorkingState, Error>;

    /// Replaces the staged root tree, and returns the updated working state.
    /// Fails with [Error::NotFound] if there's no such working state.
    async fn update_current_tree(
        &self,
        id: &Uuid,
        tree: B3Digest,
    ) -> Result<WorkingState, Error>;

    /// Replaces the staged root tree, but only if it's currently `expected`.
    /// Returns the updated working state.
    ///
    /// Fails with [Error::NotFound] if there's no such working state, and with
    /// [Error::Conflict] if another tree got staged since `expected` was
    /// observed.
    async fn compare_and_set_current_tree(
        &self,
        id: &Uuid,
        expected: &B3Digest,
        new: B3Digest,
    ) -> Result<WorkingState, Error>;
}

#[async_trait]
impl<A> WipService for A
where
    A: AsRef<dyn WipService> + Send + Sync,
{
    async fn get(&self, id: &Uuid) -> Result<Option<WorkingState>, Error> {
        self.as_ref().get(id).await
    }

    async fn insert(&self, working_state: WorkingState) -> Result<WorkingState, Error> {
        self.as_ref().insert(working_state).await
    }

    async fn update_current_tree(
        &self,
        id: &Uuid,
        tree: B3Digest,
    ) -> Result<WorkingState, Error> {
        self.as_ref().update_current_tree(id, tree).await
    }

    async fn compare_and_set_current_tree(
        &self,
        id: &Uuid,
        expected: &B3Digest,
        new: B3Digest,
    ) -> Result<WorkingState, Error> {
        self.as_ref()
            .compare_and_set_current_tree(id, expected, new)
            .await
    }
}
