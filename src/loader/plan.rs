//! Bulk load planning
//!
//! Builds the single `INSERT … SELECT` statement that has DuckDB read the
//! GeoJSON file, unnest its features and project them onto the target
//! table's columns. No feature is touched in Rust.

use crate::config::{LoaderConfig, DEFAULT_GEOMETRY_COLUMN, DEFAULT_GEOMETRY_FUNCTION};
use crate::database::{quote_identifier, quote_literal, SpatialStore};
use crate::error::{Error, Result};
use crate::types::{Column, ColumnType};
use std::path::{Path, PathBuf};

/// Characters `read_text` treats as a glob pattern
pub(super) const GLOB_CHARS: &[char] = &['*', '?', '['];

/// Plan for appending one GeoJSON document to an existing table
#[derive(Debug, Clone)]
pub struct LoadPlan {
    /// Source document
    source: PathBuf,
    /// Target table
    table: String,
    /// Target columns in table order
    columns: Vec<Column>,
    /// Column fed from each feature's `geometry` member
    geometry_column: String,
    /// Geometry-literal parser
    geometry_function: String,
}

impl LoadPlan {
    /// Create a plan with the default geometry settings
    pub fn new(source: impl AsRef<Path>, table: impl Into<String>, columns: &[Column]) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            table: table.into(),
            columns: columns.to_vec(),
            geometry_column: DEFAULT_GEOMETRY_COLUMN.to_string(),
            geometry_function: DEFAULT_GEOMETRY_FUNCTION.to_string(),
        }
    }

    /// Create a plan using a loader configuration
    pub fn from_config(
        source: impl AsRef<Path>,
        table: impl Into<String>,
        columns: &[Column],
        config: &LoaderConfig,
    ) -> Self {
        Self::new(source, table, columns)
            .with_geometry_column(&config.geometry_column)
            .with_geometry_function(&config.geometry_function)
    }

    /// Set the column that receives the feature geometry
    #[must_use]
    pub fn with_geometry_column(mut self, name: impl Into<String>) -> Self {
        self.geometry_column = name.into();
        self
    }

    /// Set the geometry parser function
    #[must_use]
    pub fn with_geometry_function(mut self, function: impl Into<String>) -> Self {
        self.geometry_function = function.into();
        self
    }

    /// Target table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Target columns
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Index of the column fed from the feature geometry
    ///
    /// The GEOMETRY column named like the configured geometry column, or
    /// failing that the first GEOMETRY column of the table.
    fn geometry_target(&self) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.is_geometry() && c.name.eq_ignore_ascii_case(&self.geometry_column))
            .or_else(|| self.columns.iter().position(Column::is_geometry))
    }

    /// SELECT expressions, one per target column
    pub fn projection(&self) -> Vec<String> {
        let geometry_target = self.geometry_target();

        self.columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let path = if Some(index) == geometry_target {
                    "$.geometry".to_string()
                } else {
                    property_path(&column.name)
                };
                let value = format!("json_extract_string(feature, {})", quote_literal(&path));

                match column.column_type {
                    ColumnType::Geometry => format!("{}({value})", self.geometry_function),
                    other => format!("CAST({value} AS {})", other.as_sql()),
                }
            })
            .collect()
    }

    /// Render the INSERT statement
    pub fn to_sql(&self) -> Result<String> {
        if self.columns.is_empty() {
            return Err(Error::load(
                &self.source,
                &self.table,
                "target table has no columns",
            ));
        }
        if self.source.to_string_lossy().contains(GLOB_CHARS) {
            return Err(Error::load(
                &self.source,
                &self.table,
                "source path must not contain glob characters (*, ?, [)",
            ));
        }

        let target_columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| quote_identifier(&c.name))
            .collect();

        Ok(format!(
            "INSERT INTO {table} ({columns})\n\
             SELECT\n    {projection}\n\
             FROM (\n    \
                 SELECT unnest(CAST(json_extract(doc, '$.features') AS JSON[])) AS feature\n    \
                 FROM (SELECT CAST(content AS JSON) AS doc FROM read_text({source})) AS document\n\
             ) AS features",
            table = quote_identifier(&self.table),
            columns = target_columns.join(", "),
            projection = self.projection().join(",\n    "),
            source = quote_literal(&self.source.to_string_lossy()),
        ))
    }

    /// Execute the plan and return the number of inserted rows
    ///
    /// The source must still exist: a pattern matching no file would
    /// otherwise insert nothing and succeed.
    pub fn execute<S: SpatialStore + ?Sized>(&self, store: &S) -> Result<usize> {
        if !self.source.is_file() {
            return Err(Error::load(
                &self.source,
                &self.table,
                "source file not found",
            ));
        }
        let sql = self.to_sql()?;
        store
            .execute(&sql)
            .map_err(|e| Error::load(&self.source, &self.table, e.to_string()))
    }
}

/// JSONPath to a feature property, quoting the key
fn property_path(key: &str) -> String {
    let escaped = key.replace('\\', "\\\\").replace('"', "\\\"");
    format!("$.properties.\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DuckDbStore;
    use std::io::Write;

    fn cities_columns() -> Vec<Column> {
        vec![
            Column::new("name", ColumnType::Varchar),
            Column::new("population", ColumnType::Bigint),
            Column::new("geom", ColumnType::Geometry),
        ]
    }

    fn write_source(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".geojson")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_projection_follows_column_order() {
        let plan = LoadPlan::new("/data/cities.geojson", "cities", &cities_columns());

        assert_eq!(
            plan.projection(),
            vec![
                r#"CAST(json_extract_string(feature, '$.properties."name"') AS VARCHAR)"#,
                r#"CAST(json_extract_string(feature, '$.properties."population"') AS BIGINT)"#,
                "ST_GeomFromGeoJSON(json_extract_string(feature, '$.geometry'))",
            ]
        );
    }

    #[test]
    fn test_sql_is_a_single_append() {
        let plan = LoadPlan::new("/data/cities.geojson", "cities", &cities_columns());
        let sql = plan.to_sql().unwrap();

        assert!(sql.starts_with(r#"INSERT INTO "cities" ("name", "population", "geom")"#));
        assert!(sql.contains("read_text('/data/cities.geojson')"));
        assert!(sql.contains("unnest("));
        assert!(!sql.contains("CREATE"));
        assert!(!sql.contains("DELETE"));
        assert!(!sql.contains(';'));
    }

    #[test]
    fn test_sql_escapes_source_path() {
        let plan = LoadPlan::new("/data/o'hare.geojson", "airports", &cities_columns());
        let sql = plan.to_sql().unwrap();
        assert!(sql.contains("read_text('/data/o''hare.geojson')"));
    }

    #[test]
    fn test_property_path_quotes_keys() {
        assert_eq!(property_path("name"), r#"$.properties."name""#);
        assert_eq!(property_path("land use"), r#"$.properties."land use""#);
        assert_eq!(property_path("a.b"), r#"$.properties."a.b""#);
        assert_eq!(property_path(r#"say "hi""#), r#"$.properties."say \"hi\"""#);
    }

    #[test]
    fn test_custom_geometry_settings() {
        let config = LoaderConfig::new()
            .with_geometry_column("shape")
            .with_geometry_function("ST_GeomFromText");
        let columns = vec![
            Column::new("geom", ColumnType::Geometry),
            Column::new("shape", ColumnType::Geometry),
        ];

        let plan = LoadPlan::from_config("a.geojson", "t", &columns, &config);
        assert_eq!(
            plan.projection(),
            vec![
                r#"ST_GeomFromText(json_extract_string(feature, '$.properties."geom"'))"#,
                "ST_GeomFromText(json_extract_string(feature, '$.geometry'))",
            ]
        );
    }

    #[test]
    fn test_falls_back_to_first_geometry_column() {
        let columns = vec![
            Column::new("id", ColumnType::Bigint),
            Column::new("the_geom", ColumnType::Geometry),
        ];
        let plan = LoadPlan::new("a.geojson", "t", &columns);
        assert_eq!(
            plan.projection()[1],
            "ST_GeomFromGeoJSON(json_extract_string(feature, '$.geometry'))"
        );
    }

    #[test]
    fn test_empty_columns_is_a_load_error() {
        let plan = LoadPlan::new("a.geojson", "t", &[]);
        assert!(matches!(plan.to_sql().unwrap_err(), Error::Load { .. }));
    }

    // Tables without a GEOMETRY column need no spatial extension, which lets
    // the generated JSON SQL run against a plain DuckDB.

    #[test]
    fn test_execute_projects_properties() {
        let store = DuckDbStore::open_in_memory().unwrap();
        store
            .execute("CREATE TABLE places (name VARCHAR, population BIGINT, area DOUBLE, capital BOOLEAN)")
            .unwrap();

        let source = write_source(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]},
                     "properties": {"name": "A", "population": 10, "area": 1.5, "capital": true}},
                    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 1]},
                     "properties": {"name": "B", "population": 20, "area": 2.25, "capital": false}}
                ]
            }"#,
        );

        let columns = store.table_columns("places").unwrap();
        let plan = LoadPlan::new(source.path(), "places", &columns);
        assert_eq!(plan.execute(&store).unwrap(), 2);

        let rows: Vec<(String, i64, f64, bool)> = store
            .connection()
            .prepare("SELECT name, population, area, capital FROM places ORDER BY name")
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(
            rows,
            vec![
                ("A".to_string(), 10, 1.5, true),
                ("B".to_string(), 20, 2.25, false),
            ]
        );
    }

    #[test]
    fn test_execute_missing_property_yields_null() {
        let store = DuckDbStore::open_in_memory().unwrap();
        store
            .execute("CREATE TABLE places (name VARCHAR, population BIGINT)")
            .unwrap();

        let source = write_source(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "geometry": null, "properties": {"name": "A", "population": 10}},
                    {"type": "Feature", "geometry": null, "properties": {"name": "B"}},
                    {"type": "Feature", "geometry": null, "properties": {"name": "C", "population": null}},
                    {"type": "Feature", "geometry": null}
                ]
            }"#,
        );

        let columns = store.table_columns("places").unwrap();
        let inserted = LoadPlan::new(source.path(), "places", &columns)
            .execute(&store)
            .unwrap();
        assert_eq!(inserted, 4);

        let nulls: i64 = store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM places WHERE population IS NULL",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(nulls, 3);
    }

    #[test]
    fn test_execute_feeds_geometry_column() {
        // Pass-through stand-in for the spatial parser, so the geometry
        // member lands in the column as JSON text
        let store = DuckDbStore::open_in_memory().unwrap();
        store
            .execute("CREATE MACRO ST_GeomFromGeoJSON(g) AS g")
            .unwrap();
        store
            .execute("CREATE TABLE cities (name VARCHAR, population BIGINT, geom VARCHAR)")
            .unwrap();

        let source = write_source(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]},
                     "properties": {"name": "A", "population": 10}},
                    {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[1, 1], [2, 2.5]]},
                     "properties": {"name": "B", "population": 20}},
                    {"type": "Feature", "geometry": null,
                     "properties": {"name": "C", "population": 30}}
                ]
            }"#,
        );

        let inserted = LoadPlan::new(source.path(), "cities", &cities_columns())
            .execute(&store)
            .unwrap();
        assert_eq!(inserted, 3);

        let rows: Vec<(String, Option<String>)> = store
            .connection()
            .prepare("SELECT name, geom FROM cities ORDER BY name")
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();

        let geometry = |row: usize| -> Option<serde_json::Value> {
            rows[row]
                .1
                .as_deref()
                .map(|text| serde_json::from_str(text).unwrap())
        };
        assert_eq!(
            geometry(0),
            Some(serde_json::json!({"type": "Point", "coordinates": [0, 0]}))
        );
        assert_eq!(
            geometry(1),
            Some(serde_json::json!({"type": "LineString", "coordinates": [[1, 1], [2, 2.5]]}))
        );
        assert_eq!(geometry(2), None);
    }

    #[test]
    fn test_execute_appends() {
        let store = DuckDbStore::open_in_memory().unwrap();
        store.execute("CREATE TABLE t (id BIGINT)").unwrap();
        let columns = store.table_columns("t").unwrap();

        let first = write_source(
            r#"{"type": "FeatureCollection", "features": [
                {"geometry": null, "properties": {"id": 1}},
                {"geometry": null, "properties": {"id": 2}}
            ]}"#,
        );
        let second = write_source(
            r#"{"type": "FeatureCollection", "features": [{"geometry": null, "properties": {"id": 3}}]}"#,
        );

        assert_eq!(LoadPlan::new(first.path(), "t", &columns).execute(&store).unwrap(), 2);
        assert_eq!(LoadPlan::new(second.path(), "t", &columns).execute(&store).unwrap(), 1);
        assert_eq!(store.row_count("t").unwrap(), 3);
    }

    #[test]
    fn test_execute_preserves_document_order() {
        let store = DuckDbStore::open_in_memory().unwrap();
        store.execute("CREATE TABLE t (id BIGINT)").unwrap();
        let columns = store.table_columns("t").unwrap();

        let source = write_source(
            r#"{"type": "FeatureCollection", "features": [
                {"geometry": null, "properties": {"id": 3}},
                {"geometry": null, "properties": {"id": 1}},
                {"geometry": null, "properties": {"id": 2}}
            ]}"#,
        );
        LoadPlan::new(source.path(), "t", &columns)
            .execute(&store)
            .unwrap();

        let ids: Vec<i64> = store
            .connection()
            .prepare("SELECT id FROM t")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_execute_conversion_failure_fails_whole_load() {
        let store = DuckDbStore::open_in_memory().unwrap();
        store.execute("CREATE TABLE t (id BIGINT)").unwrap();
        let columns = store.table_columns("t").unwrap();

        let source = write_source(
            r#"{"type": "FeatureCollection", "features": [
                {"geometry": null, "properties": {"id": 1}},
                {"geometry": null, "properties": {"id": "not a number"}}
            ]}"#,
        );

        let err = LoadPlan::new(source.path(), "t", &columns)
            .execute(&store)
            .unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
        assert_eq!(store.row_count("t").unwrap(), 0);
    }

    #[test]
    fn test_execute_missing_file_is_load_error() {
        let store = DuckDbStore::open_in_memory().unwrap();
        store.execute("CREATE TABLE t (id BIGINT)").unwrap();
        let columns = store.table_columns("t").unwrap();

        let err = LoadPlan::new("/no/such/file.geojson", "t", &columns)
            .execute(&store)
            .unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
        assert!(err.to_string().contains("/no/such/file.geojson"));
        assert_eq!(store.row_count("t").unwrap(), 0);
    }

    #[test]
    fn test_execute_vanished_file_is_load_error() {
        let store = DuckDbStore::open_in_memory().unwrap();
        store.execute("CREATE TABLE t (id BIGINT)").unwrap();
        let columns = store.table_columns("t").unwrap();

        let source = write_source(
            r#"{"type": "FeatureCollection", "features": [{"geometry": null, "properties": {"id": 1}}]}"#,
        );
        let plan = LoadPlan::new(source.path(), "t", &columns);
        source.close().unwrap();

        let err = plan.execute(&store).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }

    #[test]
    fn test_glob_characters_in_source_are_rejected() {
        for path in ["/data/*.geojson", "/data/city?.geojson", "/data/[ab].geojson"] {
            let plan = LoadPlan::new(path, "t", &cities_columns());
            assert!(
                matches!(plan.to_sql().unwrap_err(), Error::Load { .. }),
                "{path} accepted"
            );
        }
    }
}
