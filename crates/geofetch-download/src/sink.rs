//! Output-target abstraction and the built-in sinks.
//!
//! An output target is any store with native "create from a feature set"
//! and "append a feature set" operations, consumed through a narrow trait.
//! The downloader is the single writer and never reads the target back
//! during a run.

use async_trait::async_trait;
use geofetch_common::types::FeatureCollection;
use geofetch_common::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Where merged features accumulate.
#[async_trait]
pub trait FeatureSink: Send {
    /// Whether the target already exists.
    async fn exists(&self) -> Result<bool>;

    /// Create the target from an initial collection.
    async fn create(&mut self, collection: &FeatureCollection) -> Result<()>;

    /// Append a collection's features to the existing target.
    async fn append(&mut self, collection: &FeatureCollection) -> Result<()>;
}

/// In-memory sink holding the merged collection. Used by tests and by
/// callers that want the result back as a value instead of a file.
#[derive(Debug, Default)]
pub struct MemorySink {
    collection: Option<FeatureCollection>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The merged collection, if anything was written.
    pub fn into_collection(self) -> Option<FeatureCollection> {
        self.collection
    }

    pub fn feature_count(&self) -> usize {
        self.collection
            .as_ref()
            .map(|c| c.features.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl FeatureSink for MemorySink {
    async fn exists(&self) -> Result<bool> {
        Ok(self.collection.is_some())
    }

    async fn create(&mut self, collection: &FeatureCollection) -> Result<()> {
        if self.collection.is_some() {
            return Err(Error::Conversion(
                "cannot create a target that already exists".to_string(),
            ));
        }
        self.collection = Some(collection.clone());
        Ok(())
    }

    async fn append(&mut self, collection: &FeatureCollection) -> Result<()> {
        let existing = self.collection.as_mut().ok_or_else(|| {
            Error::Conversion("cannot append to a target that was never created".to_string())
        })?;
        existing
            .features
            .extend(collection.features.iter().cloned());
        Ok(())
    }
}

/// Newline-delimited JSON file sink: a metadata header line followed by one
/// feature per line. Appends open the file in append mode and never read
/// existing content, so memory stays bounded by one batch.
#[derive(Debug)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn encode_features(collection: &FeatureCollection) -> Result<String> {
        let mut buf = String::new();
        for feature in &collection.features {
            let line = serde_json::to_string(feature)
                .map_err(|e| Error::Conversion(format!("failed to encode feature: {}", e)))?;
            buf.push_str(&line);
            buf.push('\n');
        }
        Ok(buf)
    }
}

#[async_trait]
impl FeatureSink for JsonFileSink {
    async fn exists(&self) -> Result<bool> {
        Ok(fs::try_exists(&self.path).await?)
    }

    async fn create(&mut self, collection: &FeatureCollection) -> Result<()> {
        let header = serde_json::to_string(&collection.metadata())
            .map_err(|e| Error::Conversion(format!("failed to encode header: {}", e)))?;
        let features = Self::encode_features(collection)?;

        let mut file = fs::File::create(&self.path).await?;
        file.write_all(header.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.write_all(features.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn append(&mut self, collection: &FeatureCollection) -> Result<()> {
        let features = Self::encode_features(collection)?;
        let mut file = OpenOptions::new().append(true).open(&self.path).await?;
        file.write_all(features.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geofetch_common::types::Feature;
    use serde_json::json;

    fn feature(oid: i64) -> Feature {
        let mut attributes = serde_json::Map::new();
        attributes.insert("OBJECTID".to_string(), json!(oid));
        Feature {
            attributes,
            geometry: Some(json!({ "x": oid as f64, "y": 0.0 })),
        }
    }

    fn collection(oids: &[i64]) -> FeatureCollection {
        FeatureCollection {
            object_id_field_name: Some("OBJECTID".to_string()),
            geometry_type: Some("esriGeometryPoint".to_string()),
            spatial_reference: Some(json!({ "wkid": 26912 })),
            fields: vec![],
            features: oids.iter().copied().map(feature).collect(),
        }
    }

    #[tokio::test]
    async fn test_memory_sink_create_then_append() {
        let mut sink = MemorySink::new();
        assert!(!sink.exists().await.unwrap());

        sink.create(&collection(&[1, 2])).await.unwrap();
        assert!(sink.exists().await.unwrap());
        sink.append(&collection(&[3])).await.unwrap();

        let merged = sink.into_collection().unwrap();
        assert_eq!(merged.features.len(), 3);
        assert_eq!(merged.geometry_type.as_deref(), Some("esriGeometryPoint"));
    }

    #[tokio::test]
    async fn test_memory_sink_append_before_create_fails() {
        let mut sink = MemorySink::new();
        let result = sink.append(&collection(&[1])).await;
        assert!(matches!(result, Err(Error::Conversion(_))));
    }

    #[tokio::test]
    async fn test_memory_sink_double_create_fails() {
        let mut sink = MemorySink::new();
        sink.create(&collection(&[1])).await.unwrap();
        let result = sink.create(&collection(&[2])).await;
        assert!(matches!(result, Err(Error::Conversion(_))));
    }

    #[tokio::test]
    async fn test_file_sink_create_then_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.jsonl");
        let mut sink = JsonFileSink::new(&path);

        assert!(!sink.exists().await.unwrap());
        sink.create(&collection(&[1, 2])).await.unwrap();
        assert!(sink.exists().await.unwrap());
        sink.append(&collection(&[3])).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);

        let header: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(header["geometryType"], "esriGeometryPoint");

        let last: Feature = serde_json::from_str(lines[3]).unwrap();
        assert_eq!(last.attributes["OBJECTID"], json!(3));
    }

    #[tokio::test]
    async fn test_file_sink_append_to_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonFileSink::new(dir.path().join("missing.jsonl"));
        let result = sink.append(&collection(&[1])).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
