use serde::Deserialize;
use std::sync::Arc;
use verso_castore::objectservice::{self, ObjectService};
use verso_castore::Error;

use crate::refservice::{self, RefService};
use crate::wipservice::{self, WipService};

/// The addresses of the services backing a repository.
/// Every address defaults to `memory://`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceUrls {
    pub object_service_addr: String,
    pub ref_service_addr: String,
    pub wip_service_addr: String,
}

impl Default for ServiceUrls {
    fn default() -> Self {
        Self {
            object_service_addr: "memory://".to_string(),
            ref_service_addr: "memory://".to_string(),
            wip_service_addr: "memory://".to_string(),
        }
    }
}

/// Construct the service handles from their addrs.
pub async fn construct_services(
    urls: &ServiceUrls,
) -> Result<
    (
        Arc<dyn ObjectService>,
        Arc<dyn RefService>,
        Arc<dyn WipService>,
    ),
    Error,
> {
    let object_service: Arc<dyn ObjectService> =
        objectservice::from_addr(&urls.object_service_addr)
            .await?
            .into();
    let ref_service = refservice::from_addr(&urls.ref_service_addr).await?;
    let wip_service = wipservice::from_addr(&urls.wip_service_addr).await?;

    Ok((object_service, ref_service, wip_service))
}

#[cfg(test)]
mod tests {
    use super::{construct_services, ServiceUrls};

    #[test]
    fn deserialize_defaults() {
        let urls: ServiceUrls = serde_json::from_str("{}").expect("must parse");
        assert_eq!(ServiceUrls::default(), urls);

        let urls: ServiceUrls =
            serde_json::from_str(r#"{"ref_service_addr": "memory:"}"#).expect("must parse");
        assert_eq!("memory:", urls.ref_service_addr);
        assert_eq!("memory://", urls.object_service_addr);

        assert!(serde_json::from_str::<ServiceUrls>(r#"{"blob_service_addr": "x"}"#).is_err());
    }

    #[tokio::test]
    async fn construct() -> anyhow::Result<()> {
        construct_services(&ServiceUrls::default()).await?;

        let urls = ServiceUrls {
            wip_service_addr: "memory://foo".to_string(),
            ..Default::default()
        };
        assert!(construct_services(&urls).await.is_err());

        Ok(())
    }
}
