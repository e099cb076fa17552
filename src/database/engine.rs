//! DuckDB-backed spatial store
//!
//! Wraps a single `duckdb::Connection`. The connection lives exactly as
//! long as the store value and is closed when it is dropped, whichever way
//! the caller's scope exits.

use super::sql::quote_identifier;
use super::store::SpatialStore;
use crate::config::LoaderConfig;
use crate::error::{Error, Result};
use crate::types::{Column, ColumnType};
use duckdb::Connection;
use std::path::{Path, PathBuf};

/// Catalog lookup for base tables in the current database and schema
///
/// DuckDB matches identifiers case-insensitively, quoted or not, so the
/// catalog is searched the same way.
const TABLE_EXISTS_SQL: &str = "SELECT COUNT(*) FROM information_schema.tables
     WHERE lower(table_name) = lower(?)
       AND table_type = 'BASE TABLE'
       AND table_catalog = current_database()
       AND table_schema = current_schema()";

/// Column metadata of a table in ordinal order
const TABLE_COLUMNS_SQL: &str = "SELECT column_name, data_type FROM information_schema.columns
     WHERE lower(table_name) = lower(?)
       AND table_catalog = current_database()
       AND table_schema = current_schema()
     ORDER BY ordinal_position";

/// Spatial store on top of a DuckDB connection
pub struct DuckDbStore {
    /// DuckDB connection
    conn: Connection,
    /// Database file (None for in-memory)
    path: Option<PathBuf>,
}

impl DuckDbStore {
    /// Open (or create) a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            Error::connection(format!(
                "Failed to open DuckDB database '{}': {e}",
                path.display()
            ))
        })?;

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Create an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::connection(format!("Failed to create DuckDB connection: {e}")))?;

        Ok(Self { conn, path: None })
    }

    /// Open a database file and prepare the spatial extension per config
    pub fn open_with_config(path: impl AsRef<Path>, config: &LoaderConfig) -> Result<Self> {
        let store = Self::open(path)?;
        store.prepare_spatial(config)?;
        Ok(store)
    }

    /// Install and/or load the spatial extension as configured
    pub fn prepare_spatial(&self, config: &LoaderConfig) -> Result<()> {
        if config.install_spatial {
            self.install_spatial()?;
        }
        if config.load_spatial {
            self.load_spatial()?;
        }
        Ok(())
    }

    /// Install the spatial extension (downloads it on first use)
    pub fn install_spatial(&self) -> Result<()> {
        tracing::debug!("Installing spatial extension");
        self.conn
            .execute_batch("INSTALL spatial;")
            .map_err(|e| Error::config(format!("Failed to install spatial extension: {e}")))
    }

    /// Load the spatial extension into this connection
    pub fn load_spatial(&self) -> Result<()> {
        tracing::debug!("Loading spatial extension");
        self.conn
            .execute_batch("LOAD spatial;")
            .map_err(|e| Error::config(format!("Failed to load spatial extension: {e}")))
    }

    /// Test the connection
    pub fn check_connection(&self) -> Result<()> {
        self.conn
            .query_row("SELECT 1", [], |row| row.get::<_, i32>(0))
            .map_err(|e| Error::connection(format!("Connection check failed: {e}")))?;
        Ok(())
    }

    /// Count the rows currently stored in a table
    pub fn row_count(&self, table: &str) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table));
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Underlying DuckDB connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Human-readable location of the database (for logging)
    pub fn connection_info(&self) -> String {
        self.path
            .as_ref()
            .map_or_else(|| ":memory:".to_string(), |p| p.display().to_string())
    }
}

impl SpatialStore for DuckDbStore {
    fn execute(&self, sql: &str) -> Result<usize> {
        tracing::debug!("Executing statement: {}", sql);
        Ok(self.conn.execute(sql, [])?)
    }

    fn table_exists(&self, table: &str) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row(TABLE_EXISTS_SQL, [table], |row| row.get(0))
            .map_err(|e| {
                Error::connection(format!(
                    "Failed to query catalog for table '{table}' in {}: {e}",
                    self.connection_info()
                ))
            })?;
        Ok(count > 0)
    }

    fn table_columns(&self, table: &str) -> Result<Vec<Column>> {
        let mut stmt = self
            .conn
            .prepare(TABLE_COLUMNS_SQL)
            .map_err(|e| Error::connection(format!("Failed to prepare column query: {e}")))?;

        let rows = stmt
            .query_map([table], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .and_then(|mapped| mapped.collect::<duckdb::Result<Vec<_>>>())
            .map_err(|e| {
                Error::connection(format!("Failed to query columns of table '{table}': {e}"))
            })?;

        rows.into_iter()
            .map(|(name, data_type)| {
                let column_type = ColumnType::from_sql(&data_type).ok_or_else(|| {
                    Error::schema_conflict(
                        table,
                        format!("column '{name}' has unsupported type {data_type}"),
                    )
                })?;
                Ok(Column::new(name, column_type))
            })
            .collect()
    }
}
