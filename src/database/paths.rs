//! Database file naming helpers

use std::path::Path;

/// File extension used for DuckDB database files
pub const DUCKDB_EXTENSION: &str = ".duckdb";

/// Append `.duckdb` to a database file name unless already present
pub fn ensure_duckdb_extension(filename: &str) -> String {
    if filename.ends_with(DUCKDB_EXTENSION) {
        filename.to_string()
    } else {
        format!("{filename}{DUCKDB_EXTENSION}")
    }
}

/// Check whether a database file exists
pub fn database_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}
