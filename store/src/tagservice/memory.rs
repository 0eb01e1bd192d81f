use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{instrument, warn};
use uuid::Uuid;
use verso_castore::{B3Digest, Error, Tag};

use super::TagService;

#[derive(Clone)]
pub struct MemoryTagService {
    repository_id: Uuid,
    db: Arc<RwLock<HashMap<B3Digest, Tag>>>,
}

impl MemoryTagService {
    pub fn new(repository_id: Uuid) -> Self {
        Self {
            repository_id,
            db: Default::default(),
        }
    }
}

#[async_trait]
impl TagService for MemoryTagService {
    fn repository_id(&self) -> Uuid {
        self.repository_id
    }

    #[instrument(skip_all, fields(tag.name = tag.name(), tag.target = %tag.target()))]
    async fn insert(&self, tag: Tag) -> Result<B3Digest, Error> {
        if *tag.repository_id() != self.repository_id {
            warn!(tag.repository_id = %tag.repository_id(), "tag belongs to another repository");
            return Err(Error::IdentityMismatch(format!(
                "tag {:?} belongs to repository {}, not {}",
                tag.name(),
                tag.repository_id(),
                self.repository_id
            )));
        }

        let digest = tag.digest();
        self.db.write().entry(digest.clone()).or_insert(tag);

        Ok(digest)
    }

    #[instrument(skip(self, digest), fields(tag.digest = %digest))]
    async fn get(&self, digest: &B3Digest) -> Result<Option<Tag>, Error> {
        Ok(self.db.read().get(digest).cloned())
    }
}
