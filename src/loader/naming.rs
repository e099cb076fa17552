//! Table name derivation

use crate::error::{Error, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Accepted table names after normalization
static TABLE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+$").unwrap());

/// Normalize a table name: trim, then replace `-` and spaces with `_`
pub fn normalize_table_name(name: &str) -> String {
    name.trim().replace(['-', ' '], "_")
}

/// Check that a normalized table name is usable
pub fn validate_table_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::input("Table name cannot be empty"));
    }
    if !TABLE_NAME_REGEX.is_match(name) {
        return Err(Error::input(format!(
            "Invalid table name '{name}': only letters, digits and '_' are allowed"
        )));
    }
    Ok(())
}

/// Derive a table name from a source file name (`my-cities.geojson` → `my_cities`)
pub fn table_name_from_path(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .ok_or_else(|| {
            Error::input(format!(
                "Cannot derive a table name from '{}'",
                path.display()
            ))
        })?;
    Ok(normalize_table_name(&stem))
}

/// Resolve the target table: explicit override if given, otherwise derived
/// from the source path. The result is normalized and validated.
pub fn resolve_table_name(source: impl AsRef<Path>, explicit: Option<&str>) -> Result<String> {
    let name = match explicit {
        Some(name) => normalize_table_name(name),
        None => table_name_from_path(source)?,
    };
    validate_table_name(&name)?;
    Ok(name)
}
