//! Common types used throughout xyzduck
//!
//! This module contains the column model shared by schema inference,
//! the catalog layer and the load planner.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Column Type
// ============================================================================

/// Storage type of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    Varchar,
    Bigint,
    Double,
    Boolean,
    Geometry,
}

impl ColumnType {
    /// SQL type name used in DDL and casts
    pub fn as_sql(self) -> &'static str {
        match self {
            ColumnType::Varchar => "VARCHAR",
            ColumnType::Bigint => "BIGINT",
            ColumnType::Double => "DOUBLE",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Geometry => "GEOMETRY",
        }
    }

    /// Parse a type name as reported by the DuckDB catalog
    ///
    /// Accepts the canonical names plus the common DuckDB aliases. Geometry
    /// types may carry a CRS suffix, e.g. `GEOMETRY('OGC:CRS84')`.
    pub fn from_sql(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        if upper.starts_with("GEOMETRY") {
            return Some(ColumnType::Geometry);
        }
        match upper.as_str() {
            "VARCHAR" | "TEXT" | "STRING" | "CHAR" | "BPCHAR" => Some(ColumnType::Varchar),
            "BIGINT" | "INT8" | "LONG" => Some(ColumnType::Bigint),
            "DOUBLE" | "FLOAT8" => Some(ColumnType::Double),
            "BOOLEAN" | "BOOL" | "LOGICAL" => Some(ColumnType::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for ColumnType {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnType::from_sql(s)
            .ok_or_else(|| crate::error::Error::Other(format!("Unsupported column type: {s}")))
    }
}

// ============================================================================
// Column
// ============================================================================

/// A named, typed table column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,

    /// Storage type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    /// Check if this column stores geometry
    pub fn is_geometry(&self) -> bool {
        self.column_type == ColumnType::Geometry
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.column_type)
    }
}
