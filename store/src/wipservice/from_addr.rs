use std::sync::Arc;
use url::Url;
use verso_castore::Error;

use super::{MemoryWipService, WipService};

/// Constructs a new instance of a [WipService] from an URI.
///
/// The following URIs are supported:
/// - `memory:`
///   Uses a in-memory implementation.
pub async fn from_addr(uri: &str) -> Result<Arc<dyn WipService>, Error> {
    let url = Url::parse(uri)?;

    let wip_service: Arc<dyn WipService> = match url.scheme() {
        "memory" => {
            // memory doesn't support host or path in the URL.
            if url.has_host() || !url.path().is_empty() {
                return Err(Error::StorageError("invalid url".to_string()));
            }
            Arc::new(MemoryWipService::default())
        }
        _ => {
            return Err(Error::StorageError(format!(
                "unknown scheme: {}",
                url.scheme()
            )))
        }
    };
    Ok(wip_service)
}

#[cfg(test)]
mod tests {
    use super::from_addr;
    use rstest::rstest;

    #[rstest]
    #[case::unsupported_scheme("sled://", false)]
    #[case::memory_valid("memory://", true)]
    #[case::memory_invalid_host("memory://foo", false)]
    #[case::not_an_url("memory", false)]
    #[tokio::test]
    async fn test_from_addr_tokio(#[case] uri_str: &str, #[case] exp_succeed: bool) {
        if exp_succeed {
            from_addr(uri_str).await.expect("should succeed");
        } else {
            assert!(from_addr(uri_str).await.is_err(), "should fail");
        }
    }
}
