use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;
use verso_castore::{B3Digest, Error};

use super::{WipService, WorkingState};

#[derive(Clone, Default)]
pub struct MemoryWipService {
    db: Arc<RwLock<HashMap<Uuid, WorkingState>>>,
}

#[async_trait]
impl WipService for MemoryWipService {
    #[instrument(skip(self, id), fields(wip_id = %id))]
    async fn get(&self, id: &Uuid) -> Result<Option<WorkingState>, Error> {
        Ok(self.db.read().get(id).cloned())
    }

    #[instrument(skip_all, fields(wip_id = %working_state.id, ref_id = %working_state.ref_id))]
    async fn insert(&self, working_state: WorkingState) -> Result<WorkingState, Error> {
        let mut db = self.db.write();

        if db.contains_key(&working_state.id) {
            return Err(Error::Conflict(format!(
                "working state {} already exists",
                working_state.id
            )));
        }

        db.insert(working_state.id, working_state.clone());
        Ok(working_state)
    }

    #[instrument(skip(self, id, tree), fields(wip_id = %id, tree.digest = %tree))]
    async fn update_current_tree(
        &self,
        id: &Uuid,
        tree: B3Digest,
    ) -> Result<WorkingState, Error> {
        let mut db = self.db.write();

        let Some(working_state) = db.get_mut(id) else {
            return Err(Error::NotFound(format!("working state {}", id)));
        };

        debug!(old = %working_state.current_tree, "staging tree");
        working_state.current_tree = tree;

        Ok(working_state.clone())
    }

    #[instrument(skip(self, id, expected, new), fields(wip_id = %id, tree.digest = %new))]
    async fn compare_and_set_current_tree(
        &self,
        id: &Uuid,
        expected: &B3Digest,
        new: B3Digest,
    ) -> Result<WorkingState, Error> {
        // compare and write under the same lock.
        let mut db = self.db.write();

        let Some(working_state) = db.get_mut(id) else {
            return Err(Error::NotFound(format!("working state {}", id)));
        };

        if working_state.current_tree != *expected {
            warn!(
                current = %working_state.current_tree,
                %expected,
                "tree staged concurrently"
            );
            return Err(Error::Conflict(format!(
                "working state {} stages {}, expected {}",
                id, working_state.current_tree, expected
            )));
        }

        debug!(old = %working_state.current_tree, "staging tree");
        working_state.current_tree = new;

        Ok(working_state.clone())
    }
}
