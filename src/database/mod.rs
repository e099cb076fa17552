//! Spatial storage via DuckDB
//!
//! The load pipeline talks to storage only through [`SpatialStore`]:
//! execute a statement, check the catalog for a table, read a table's
//! columns. [`DuckDbStore`] implements it on a DuckDB connection with the
//! `spatial` extension loaded.

mod catalog;
mod engine;
mod paths;
mod sql;
mod store;

pub use catalog::{create_table, create_table_sql, table_exists};
pub use engine::DuckDbStore;
pub use paths::{database_exists, ensure_duckdb_extension, DUCKDB_EXTENSION};
pub use sql::{quote_identifier, quote_literal};
pub use store::SpatialStore;
