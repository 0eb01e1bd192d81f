use std::sync::Arc;
use url::Url;
use uuid::Uuid;
use verso_castore::Error;

use super::{MemoryTagService, TagService};

/// Constructs a new instance of a [TagService] for the given repository from
/// an URI.
///
/// The following URIs are supported:
/// - `memory:`
///   Uses a in-memory implementation.
pub async fn from_addr(uri: &str, repository_id: Uuid) -> Result<Arc<dyn TagService>, Error> {
    let url = Url::parse(uri)?;

    let tag_service: Arc<dyn TagService> = match url.scheme() {
        "memory" => {
            // memory doesn't support host or path in the URL.
            if url.has_host() || !url.path().is_empty() {
                return Err(Error::StorageError("invalid url".to_string()));
            }
            Arc::new(MemoryTagService::new(repository_id))
        }
        _ => {
            return Err(Error::StorageError(format!(
                "unknown scheme: {}",
                url.scheme()
            )))
        }
    };
    Ok(tag_service)
}
