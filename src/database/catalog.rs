//! Table existence and creation

use super::sql::quote_identifier;
use super::store::SpatialStore;
use crate::error::{Error, Result};
use crate::schema::Schema;

/// Check whether a table exists in the store's catalog
///
/// Always asks the store; nothing is cached between calls.
pub fn table_exists<S: SpatialStore + ?Sized>(store: &S, table: &str) -> Result<bool> {
    store.table_exists(table)
}

/// Build the `CREATE TABLE` statement for a schema
pub fn create_table_sql(table: &str, schema: &Schema) -> String {
    let columns: Vec<String> = schema
        .columns
        .iter()
        .map(|c| format!("{} {}", quote_identifier(&c.name), c.column_type.as_sql()))
        .collect();

    format!(
        "CREATE TABLE {} ({})",
        quote_identifier(table),
        columns.join(", ")
    )
}

/// Create a table from a schema
///
/// Issues exactly one DDL statement. Any failure, typically a name taken by
/// a view or another object, is reported as a schema conflict.
pub fn create_table<S: SpatialStore + ?Sized>(
    store: &S,
    table: &str,
    schema: &Schema,
) -> Result<()> {
    if schema.is_empty() {
        return Err(Error::schema_conflict(table, "schema has no columns"));
    }

    let sql = create_table_sql(table, schema);
    store
        .execute(&sql)
        .map_err(|e| Error::schema_conflict(table, format!("CREATE TABLE failed: {e}")))?;

    tracing::info!("Table '{}' created with {} columns", table, schema.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DuckDbStore;
    use crate::types::{Column, ColumnType};

    fn plain_schema() -> Schema {
        Schema::from_columns(vec![
            Column::new("name", ColumnType::Varchar),
            Column::new("population", ColumnType::Bigint),
            Column::new("area", ColumnType::Double),
            Column::new("capital", ColumnType::Boolean),
        ])
    }

    #[test]
    fn test_create_table_sql() {
        let schema = Schema::from_columns(vec![
            Column::new("name", ColumnType::Varchar),
            Column::new("population", ColumnType::Bigint),
            Column::new("geom", ColumnType::Geometry),
        ]);

        assert_eq!(
            create_table_sql("cities", &schema),
            r#"CREATE TABLE "cities" ("name" VARCHAR, "population" BIGINT, "geom" GEOMETRY)"#
        );
    }

    #[test]
    fn test_create_table_sql_quotes_odd_names() {
        let schema = Schema::from_columns(vec![Column::new("land use", ColumnType::Varchar)]);
        assert_eq!(
            create_table_sql("my_table", &schema),
            r#"CREATE TABLE "my_table" ("land use" VARCHAR)"#
        );
    }

    #[test]
    fn test_create_table_matches_schema() {
        let store = DuckDbStore::open_in_memory().unwrap();
        let schema = plain_schema();

        create_table(&store, "cities", &schema).unwrap();

        assert!(table_exists(&store, "cities").unwrap());
        assert_eq!(store.table_columns("cities").unwrap(), schema.columns);
    }

    #[test]
    fn test_create_table_twice_conflicts() {
        let store = DuckDbStore::open_in_memory().unwrap();
        create_table(&store, "cities", &plain_schema()).unwrap();

        let err = create_table(&store, "cities", &plain_schema()).unwrap_err();
        assert!(matches!(err, Error::SchemaConflict { .. }));
    }

    #[test]
    fn test_create_table_over_view_conflicts() {
        let store = DuckDbStore::open_in_memory().unwrap();
        store.execute("CREATE VIEW cities AS SELECT 1 AS id").unwrap();

        let err = create_table(&store, "cities", &plain_schema()).unwrap_err();
        assert!(matches!(err, Error::SchemaConflict { .. }));
    }

    #[test]
    fn test_create_table_rejects_empty_schema() {
        let store = DuckDbStore::open_in_memory().unwrap();
        let err = create_table(&store, "empty", &Schema::new()).unwrap_err();
        assert!(matches!(err, Error::SchemaConflict { .. }));
        assert!(!table_exists(&store, "empty").unwrap());
    }
}
