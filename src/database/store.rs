//! Storage interface consumed by the load pipeline

use crate::error::Result;
use crate::types::Column;

/// The narrow slice of a spatial SQL engine the loader relies on
///
/// Geometry conversion is not a method here: it happens inside SQL through
/// the engine's geometry-literal parser (see `LoaderConfig::geometry_function`).
pub trait SpatialStore {
    /// Execute a single statement and return the number of affected rows
    fn execute(&self, sql: &str) -> Result<usize>;

    /// Check whether a base table with exactly this name exists
    fn table_exists(&self, table: &str) -> Result<bool>;

    /// Columns of an existing table in ordinal order
    fn table_columns(&self, table: &str) -> Result<Vec<Column>>;
}

impl<S: SpatialStore + ?Sized> SpatialStore for &S {
    fn execute(&self, sql: &str) -> Result<usize> {
        (**self).execute(sql)
    }

    fn table_exists(&self, table: &str) -> Result<bool> {
        (**self).table_exists(table)
    }

    fn table_columns(&self, table: &str) -> Result<Vec<Column>> {
        (**self).table_columns(table)
    }
}
