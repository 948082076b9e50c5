//! CLI command implementations.

mod download;
mod info;

pub use download::DownloadCommand;
pub use info::InfoCommand;

use anyhow::{anyhow, Result};
use geofetch_client::{FeatureServiceClient, FeatureServiceConfig};
use std::time::Duration;

/// Environment fallback for the service URL flag.
const SERVICE_URL_ENV: &str = "GEOFETCH_SERVICE_URL";

/// Resolve the layer URL from the flag or the environment.
fn resolve_service_url(flag: Option<String>) -> Result<String> {
    match flag {
        Some(url) => Ok(url),
        None => std::env::var(SERVICE_URL_ENV).map_err(|_| {
            anyhow!(
                "no service URL given; pass --service-url or set {}",
                SERVICE_URL_ENV
            )
        }),
    }
}

fn build_client(url: String, oid_field: String, timeout_secs: u64) -> Result<FeatureServiceClient> {
    let config = FeatureServiceConfig {
        base_url: url,
        oid_field,
        timeout: Duration::from_secs(timeout_secs),
    };
    Ok(FeatureServiceClient::new(config)?)
}
