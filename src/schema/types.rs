//! Schema types

use crate::types::{Column, ColumnType};
use serde::{Deserialize, Serialize};

/// Ordered, typed column list a table is created with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Columns in table order
    pub columns: Vec<Column>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schema from an existing column list
    pub fn from_columns(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Append a column
    pub fn add_column(&mut self, name: impl Into<String>, column_type: ColumnType) {
        self.columns.push(Column::new(name, column_type));
    }

    /// Get a column by exact name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Check if a column exists, comparing names the way DuckDB resolves
    /// identifiers (case-insensitively)
    pub fn has_column(&self, name: &str) -> bool {
        self.columns
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Columns that do not hold geometry
    pub fn property_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_geometry())
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the schema has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
