//! GeoJSON document parsing
//!
//! Reads a whole document into a [`FeatureCollection`]. Only schema
//! inference goes through here; the bulk load has DuckDB read the file
//! itself.

use super::types::{FeatureCollection, FEATURE_COLLECTION};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read and parse a FeatureCollection from a file
pub fn read_feature_collection(path: impl AsRef<Path>) -> Result<FeatureCollection> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(path)
        } else {
            Error::input(format!(
                "Failed to read GeoJSON file '{}': {e}",
                path.display()
            ))
        }
    })?;

    parse_document(&content).map_err(|message| {
        Error::input(format!(
            "Failed to parse GeoJSON '{}': {message}",
            path.display()
        ))
    })
}

/// Parse a FeatureCollection from a JSON string
pub fn parse_feature_collection(json: &str) -> Result<FeatureCollection> {
    parse_document(json)
        .map_err(|message| Error::input(format!("Failed to parse GeoJSON: {message}")))
}

fn parse_document(json: &str) -> std::result::Result<FeatureCollection, String> {
    let collection: FeatureCollection = serde_json::from_str(json).map_err(|e| e.to_string())?;

    // Tolerate a missing "type"; anything else must be a feature collection.
    if !collection.kind.is_empty() && collection.kind != FEATURE_COLLECTION {
        return Err(format!(
            "expected a {FEATURE_COLLECTION}, found '{}'",
            collection.kind
        ));
    }

    Ok(collection)
}
