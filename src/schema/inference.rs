//! Schema inference from GeoJSON features

use super::types::Schema;
use crate::config::DEFAULT_GEOMETRY_COLUMN;
use crate::error::{Error, Result};
use crate::geojson::{Feature, FeatureCollection};
use crate::types::{ColumnType, JsonValue};
use std::path::Path;

/// Infer the storage type of a single property value
///
/// Integral numbers become BIGINT, other numbers DOUBLE. Nulls, arrays and
/// objects fall back to VARCHAR so a later row can still be stored.
pub fn infer_type(value: &JsonValue) -> ColumnType {
    match value {
        JsonValue::String(_) => ColumnType::Varchar,
        JsonValue::Bool(_) => ColumnType::Boolean,
        JsonValue::Number(n) => {
            if n.is_i64() {
                return ColumnType::Bigint;
            }
            match n.as_f64() {
                Some(f) if is_integral(f) => ColumnType::Bigint,
                _ => ColumnType::Double,
            }
        }
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => ColumnType::Varchar,
    }
}

/// True when `f` survives truncation to i64 unchanged
fn is_integral(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
}

/// Builds a table schema from one representative feature
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    /// Name of the trailing geometry column
    geometry_column: String,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    /// Create a builder using the default geometry column name
    pub fn new() -> Self {
        Self {
            geometry_column: DEFAULT_GEOMETRY_COLUMN.to_string(),
        }
    }

    /// Set the geometry column name
    #[must_use]
    pub fn with_geometry_column(mut self, name: impl Into<String>) -> Self {
        self.geometry_column = name.into();
        self
    }

    /// Geometry column name used by this builder
    pub fn geometry_column(&self) -> &str {
        &self.geometry_column
    }

    /// Build a schema from a single feature
    ///
    /// One column per property, then the geometry column. A property whose
    /// name matches the geometry column or an earlier property (ignoring
    /// case) is skipped, so every column name is unique in DuckDB.
    pub fn build(&self, feature: &Feature) -> Schema {
        let mut schema = Schema::new();

        for (key, value) in &feature.properties {
            if key.eq_ignore_ascii_case(&self.geometry_column) || schema.has_column(key) {
                tracing::warn!(
                    "Skipping property '{}': name collides with an existing column",
                    key
                );
                continue;
            }
            schema.add_column(key.clone(), infer_type(value));
        }

        schema.add_column(self.geometry_column.clone(), ColumnType::Geometry);
        schema
    }

    /// Build a schema from the first feature of a collection
    pub fn build_from_collection(
        &self,
        collection: &FeatureCollection,
        source: impl AsRef<Path>,
    ) -> Result<Schema> {
        let feature = collection
            .first()
            .ok_or_else(|| Error::empty_source(source))?;
        Ok(self.build(feature))
    }
}

/// Infer a schema from a collection with the default geometry column
pub fn infer_schema(collection: &FeatureCollection, source: impl AsRef<Path>) -> Result<Schema> {
    SchemaBuilder::new().build_from_collection(collection, source)
}
