use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{instrument, warn};

use super::ObjectService;
use crate::{B3Digest, Error, Object};

#[derive(Clone, Default)]
pub struct MemoryObjectService {
    db: Arc<RwLock<HashMap<B3Digest, Object>>>,
}

#[async_trait]
impl ObjectService for MemoryObjectService {
    #[instrument(skip(self, digest), fields(object.digest = %digest))]
    async fn get(&self, digest: &B3Digest) -> Result<Option<Object>, Error> {
        let db = self.db.read();

        match db.get(digest) {
            // The object was not found, return
            None => Ok(None),

            Some(object) => {
                // Validate the retrieved object indeed has the
                // digest we expect it to have, to detect corruptions.
                let actual_digest = object.digest();
                if actual_digest != *digest {
                    warn!(%actual_digest, "object digest mismatch");
                    return Err(Error::StorageError(format!(
                        "requested object with digest {}, but got {}",
                        digest, actual_digest
                    )));
                }

                Ok(Some(object.clone()))
            }
        }
    }

    #[instrument(skip(self, object), fields(object.digest = %object.digest(), object.type = %object.object_type()))]
    async fn put(&self, object: Object) -> Result<B3Digest, Error> {
        let digest = object.digest();

        // objects are write-once, keep what's already there.
        let mut db = self.db.write();
        if let Some(existing) = db.get(&digest) {
            if existing.object_type() != object.object_type() {
                warn!(existing_type = %existing.object_type(), "object type mismatch");
                return Err(Error::StorageError(format!(
                    "object {} is already stored as a {}, refusing to store a {}",
                    digest,
                    existing.object_type(),
                    object.object_type()
                )));
            }
            return Ok(digest);
        }

        db.insert(digest.clone(), object);
        Ok(digest)
    }

    #[instrument(skip(self, digest), fields(object.digest = %digest))]
    async fn has(&self, digest: &B3Digest) -> Result<bool, Error> {
        Ok(self.db.read().contains_key(digest))
    }
}
