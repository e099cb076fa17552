//! Load result types

use crate::types::Column;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Outcome of a successful load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Target table
    pub table: String,
    /// Source document
    pub source: PathBuf,
    /// Rows inserted by this load
    pub rows_inserted: usize,
    /// Table columns in order (inferred if created, introspected otherwise)
    pub columns: Vec<Column>,
    /// Whether this load created the table
    pub created: bool,
}

impl LoadReport {
    /// `name (TYPE), …` listing of the columns
    pub fn column_summary(&self) -> String {
        self.columns
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loaded {} features into table '{}'",
            self.rows_inserted, self.table
        )
    }
}
