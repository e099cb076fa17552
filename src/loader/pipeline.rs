//! Load orchestration
//!
//! `validate inputs → [infer schema + create table] → bulk insert → report`.
//! Each step fails fast with a typed error; nothing is retried and a table
//! created earlier in the same run is left in place if the insert fails.

use super::naming::resolve_table_name;
use super::plan::{LoadPlan, GLOB_CHARS};
use super::types::LoadReport;
use crate::config::LoaderConfig;
use crate::database::{create_table, table_exists, SpatialStore};
use crate::error::{Error, Result};
use crate::geojson::read_feature_collection;
use crate::schema::SchemaBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads GeoJSON documents into spatial tables
#[derive(Debug, Clone, Default)]
pub struct GeoJsonLoader {
    config: LoaderConfig,
}

impl GeoJsonLoader {
    /// Create a loader with the given configuration
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Loader configuration
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a GeoJSON file into a table, creating the table on first use
    ///
    /// The table name defaults to the normalized file stem. When the table
    /// already exists its current columns are used as-is and no schema is
    /// inferred.
    pub fn load<S: SpatialStore + ?Sized>(
        &self,
        source: impl AsRef<Path>,
        table: Option<&str>,
        store: &S,
    ) -> Result<LoadReport> {
        let source = source.as_ref();

        let table = resolve_table_name(source, table)?;
        let source = validate_source(source)?;

        let (columns, created) = if table_exists(store, &table)? {
            tracing::info!("Appending to existing table '{}'", table);
            (store.table_columns(&table)?, false)
        } else {
            tracing::info!("Creating table '{}' from {}", table, source.display());
            let collection = read_feature_collection(&source)?;
            let schema = SchemaBuilder::new()
                .with_geometry_column(&self.config.geometry_column)
                .build_from_collection(&collection, &source)?;
            create_table(store, &table, &schema)?;
            (schema.columns, true)
        };

        let plan = LoadPlan::from_config(&source, &table, &columns, &self.config);
        let rows_inserted = plan.execute(store)?;

        tracing::info!("Loaded {} features into table '{}'", rows_inserted, table);

        Ok(LoadReport {
            table,
            source,
            rows_inserted,
            columns,
            created,
        })
    }
}

/// Load a GeoJSON file with the default configuration
pub fn load<S: SpatialStore + ?Sized>(
    source: impl AsRef<Path>,
    table: Option<&str>,
    store: &S,
) -> Result<LoadReport> {
    GeoJsonLoader::default().load(source, table, store)
}

/// Check the source is an existing file and return its absolute path
fn validate_source(source: &Path) -> Result<PathBuf> {
    if !source.is_file() {
        return Err(Error::file_not_found(source));
    }
    if source.to_string_lossy().contains(GLOB_CHARS) {
        return Err(Error::input(format!(
            "GeoJSON path '{}' contains glob characters (*, ?, [)",
            source.display()
        )));
    }
    fs::canonicalize(source).map_err(|e| {
        Error::input(format!(
            "Failed to resolve GeoJSON path '{}': {e}",
            source.display()
        ))
    })
}
