use std::sync::Arc;
use url::Url;
use verso_castore::Error;

use super::{MemoryRefService, RefService};

/// Constructs a new instance of a [RefService] from an URI.
///
/// The following URIs are supported:
/// - `memory:`
///   Uses a in-memory implementation.
pub async fn from_addr(uri: &str) -> Result<Arc<dyn RefService>, Error> {
    let url = Url::parse(uri)?;

    let ref_service: Arc<dyn RefService> = match url.scheme() {
        "memory" => {
            // memory doesn't support host or path in the URL.
            if url.has_host() || !url.path().is_empty() {
                return Err(Error::StorageError("invalid url".to_string()));
            }
            Arc::new(MemoryRefService::default())
        }
        _ => {
            return Err(Error::StorageError(format!(
                "unknown scheme: {}",
                url.scheme()
            )))
        }
    };
    Ok(ref_service)
}
