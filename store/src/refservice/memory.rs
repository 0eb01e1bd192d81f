use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;
use verso_castore::{B3Digest, Error};

use super::{Ref, RefService};

#[derive(Clone, Default)]
pub struct MemoryRefService {
    db: Arc<RwLock<HashMap<Uuid, Ref>>>,
}

#[async_trait]
impl RefService for MemoryRefService {
    #[instrument(skip(self, id), fields(ref_id = %id))]
    async fn get(&self, id: &Uuid) -> Result<Option<Ref>, Error> {
        Ok(self.db.read().get(id).cloned())
    }

    #[instrument(skip(self, repository_id), fields(repository_id = %repository_id))]
    async fn get_by_name(&self, repository_id: &Uuid, name: &str) -> Result<Option<Ref>, Error> {
        let db = self.db.read();

        Ok(db
            .values()
            .find(|r| r.repository_id == *repository_id && r.name == name)
            .cloned())
    }

    #[instrument(skip_all, fields(ref_id = %new_ref.id, ref_name = %new_ref.name))]
    async fn insert(&self, new_ref: Ref) -> Result<Ref, Error> {
        let mut db = self.db.write();

        if db.contains_key(&new_ref.id) {
            return Err(Error::Conflict(format!("ref {} already exists", new_ref.id)));
        }
        if db
            .values()
            .any(|r| r.repository_id == new_ref.repository_id && r.name == new_ref.name)
        {
            return Err(Error::Conflict(format!(
                "ref {:?} already exists in repository {}",
                new_ref.name, new_ref.repository_id
            )));
        }

        db.insert(new_ref.id, new_ref.clone());
        Ok(new_ref)
    }

    #[instrument(skip(self, id, expected, new), fields(ref_id = %id, commit = %new))]
    async fn compare_and_set(
        &self,
        id: &Uuid,
        expected: Option<&B3Digest>,
        new: B3Digest,
    ) -> Result<Ref, Error> {
        // compare and write under the same lock.
        let mut db = self.db.write();

        let Some(r) = db.get_mut(id) else {
            return Err(Error::NotFound(format!("ref {}", id)));
        };

        if r.commit.as_ref() != expected {
            warn!(current = ?r.commit, ?expected, "ref moved concurrently");
            return Err(Error::Conflict(format!(
                "ref {:?} points to {:?}, expected {:?}",
                r.name, r.commit, expected
            )));
        }

        debug!(old = ?r.commit, "moving ref");
        r.commit = Some(new);

        Ok(r.clone())
    }
}
