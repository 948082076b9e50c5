//! Typed records for the feature-service REST wire format.
//!
//! The query endpoints speak Esri JSON: a ranged feature query returns a
//! collection with shared schema metadata plus a `features` list, the
//! ids-only variant returns `objectIds`, and the service root reports
//! `maxRecordCount`. The mandatory keys are non-optional fields here so a
//! malformed payload fails at deserialization rather than deep inside the
//! download loop.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Unique integer identifier used to range-partition records.
pub type ObjectId = i64;

/// One record: attributes plus optional geometry. Geometry is kept as raw
/// JSON; interpreting it is the output target's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Value>,
}

/// Schema description of one attribute field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Shared (non-feature) metadata of a collection, for sinks that write the
/// header separately from the features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id_field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldInfo>,
}

/// Response of a ranged feature query. `features` is mandatory; everything
/// else is the shared metadata the first batch seeds an accumulator with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id_field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldInfo>,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Shared metadata without the feature list.
    pub fn metadata(&self) -> CollectionMetadata {
        CollectionMetadata {
            object_id_field_name: self.object_id_field_name.clone(),
            geometry_type: self.geometry_type.clone(),
            spatial_reference: self.spatial_reference.clone(),
            fields: self.fields.clone(),
        }
    }
}

/// Response of an ids-only query (`returnIdsOnly=true`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectIdsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id_field_name: Option<String>,
    pub object_ids: Vec<ObjectId>,
}

/// Service-root metadata (`f=pjson` on the layer URL).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_version: Option<f64>,
    pub max_record_count: i64,
}

impl ServiceInfo {
    /// The server-advertised page limit as a validated batch size. The value
    /// comes from a live probe but is treated like any other configuration:
    /// it must be a positive integer before the plan is built.
    pub fn batch_size(&self) -> Result<usize> {
        if self.max_record_count <= 0 {
            return Err(Error::Config(format!(
                "server reported maxRecordCount {}; expected a positive integer",
                self.max_record_count
            )));
        }
        Ok(self.max_record_count as usize)
    }
}
