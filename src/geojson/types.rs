//! GeoJSON document types

use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Deserializer, Serialize};

/// `type` member of a feature collection document
pub const FEATURE_COLLECTION: &str = "FeatureCollection";

/// A GeoJSON FeatureCollection
///
/// Only the members the loader needs are modelled; `bbox`, `crs` and
/// foreign members are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Document type (expected to be "FeatureCollection")
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Features in document order
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Number of features in the collection
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if the collection has no features
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// The feature used for schema inference
    pub fn first(&self) -> Option<&Feature> {
        self.features.first()
    }
}

/// A single GeoJSON Feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Geometry literal, kept opaque
    #[serde(default)]
    pub geometry: JsonValue,

    /// Property mapping; `null` or absent is treated as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: JsonObject,
}

impl Feature {
    /// Look up a property value by key
    pub fn property(&self, key: &str) -> Option<&JsonValue> {
        self.properties.get(key)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<JsonObject, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<JsonObject>::deserialize(deserializer)?.unwrap_or_default())
}
