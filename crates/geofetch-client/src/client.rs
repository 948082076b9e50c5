//! Feature-service REST client.

use async_trait::async_trait;
use geofetch_common::types::{FeatureCollection, ObjectId, ObjectIdsResponse, ServiceInfo};
use geofetch_common::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Configuration for the feature-service client
#[derive(Debug, Clone)]
pub struct FeatureServiceConfig {
    /// Layer URL, e.g. "https://host/arcgis/rest/services/Parcels/FeatureServer/0"
    pub base_url: String,
    /// Object-ID field used in range predicates
    pub oid_field: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for FeatureServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            oid_field: "OBJECTID".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl FeatureServiceConfig {
    /// Create a config for the given layer URL with default field and timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Validate the config before any request is issued.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("service URL must not be empty".to_string()));
        }
        if self.oid_field.trim().is_empty() {
            return Err(Error::Config(
                "object-ID field name must not be empty".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Ranged feature query seam consumed by the download loop.
///
/// [`FeatureServiceClient`] is the production implementation; tests drive the
/// loop with scripted responses instead of live HTTP.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Fetch all features whose object ID lies in `[begin, end]`, with all
    /// attribute fields and geometry.
    async fn query_range(&self, begin: ObjectId, end: ObjectId) -> Result<FeatureCollection>;
}

/// HTTP client for one feature-service layer.
#[derive(Debug, Clone)]
pub struct FeatureServiceClient {
    client: Client,
    base_url: String,
    oid_field: String,
}

impl FeatureServiceClient {
    /// Create a new client.
    pub fn new(config: FeatureServiceConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            oid_field: config.oid_field,
        })
    }

    /// Layer URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Range predicate for the `where` parameter of a ranged query.
    fn range_where_clause(&self, begin: ObjectId, end: ObjectId) -> String {
        format!(
            "{field} >= {begin} and {field} <= {end}",
            field = self.oid_field,
            begin = begin,
            end = end
        )
    }

    /// GET `url` with `params`, check the status, and decode the body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
        context: &str,
    ) -> Result<T> {
        debug!("GET {} ({})", url, context);
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| Error::Fetch {
                context: context.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Fetch {
                context: context.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let body = response.text().await.map_err(|e| Error::Fetch {
            context: context.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|e| Error::Parse {
            context: context.to_string(),
            message: e.to_string(),
        })
    }

    /// Enumerate every object ID in the layer. The server returns them for
    /// free even when the layer exceeds `maxRecordCount`, which is what makes
    /// range-partitioned bulk download possible.
    pub async fn fetch_object_ids(&self) -> Result<ObjectIdsResponse> {
        let url = format!("{}/query", self.base_url);
        let params = [
            ("where", "1=1".to_string()),
            ("returnIdsOnly", "true".to_string()),
            ("f", "pjson".to_string()),
        ];
        self.get_json(&url, &params, "object ID query").await
    }

    /// Fetch the layer metadata, including the advertised `maxRecordCount`.
    pub async fn fetch_service_info(&self) -> Result<ServiceInfo> {
        let params = [("f", "pjson".to_string())];
        self.get_json(&self.base_url, &params, "service info").await
    }
}

#[async_trait]
impl QueryService for FeatureServiceClient {
    async fn query_range(&self, begin: ObjectId, end: ObjectId) -> Result<FeatureCollection> {
        let url = format!("{}/query", self.base_url);
        let params = [
            ("where", self.range_where_clause(begin, end)),
            ("outFields", "*".to_string()),
            ("returnGeometry", "true".to_string()),
            ("f", "json".to_string()),
        ];
        let context = format!("OID range {} to {}", begin, end);
        self.get_json(&url, &params, &context).await
    }
}
