//! Loader configuration
//!
//! Settings that shape the generated schema and SQL. Everything has a
//! sensible default; a YAML file can override individual fields:
//!
//! ```yaml
//! geometry_column: the_geom
//! install_spatial: true
//! ```

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Default name of the geometry column
pub const DEFAULT_GEOMETRY_COLUMN: &str = "geom";

/// Default geometry-literal parser function
pub const DEFAULT_GEOMETRY_FUNCTION: &str = "ST_GeomFromGeoJSON";

/// Bare SQL identifier: letter or underscore, then word characters
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Configuration for a GeoJSON load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Name of the geometry column appended to inferred schemas
    pub geometry_column: String,

    /// SQL function converting a GeoJSON geometry into a native geometry
    pub geometry_function: String,

    /// Run `LOAD spatial` before touching the store
    pub load_spatial: bool,

    /// Run `INSTALL spatial` first (needs network access on a fresh machine)
    pub install_spatial: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            geometry_column: DEFAULT_GEOMETRY_COLUMN.to_string(),
            geometry_function: DEFAULT_GEOMETRY_FUNCTION.to_string(),
            load_spatial: true,
            install_spatial: false,
        }
    }
}

impl LoaderConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the geometry column name
    #[must_use]
    pub fn with_geometry_column(mut self, name: impl Into<String>) -> Self {
        self.geometry_column = name.into();
        self
    }

    /// Set the geometry parser function
    #[must_use]
    pub fn with_geometry_function(mut self, function: impl Into<String>) -> Self {
        self.geometry_function = function.into();
        self
    }

    /// Enable/disable loading the spatial extension
    #[must_use]
    pub fn with_load_spatial(mut self, enabled: bool) -> Self {
        self.load_spatial = enabled;
        self
    }

    /// Enable/disable installing the spatial extension
    #[must_use]
    pub fn with_install_spatial(mut self, enabled: bool) -> Self {
        self.install_spatial = enabled;
        self
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: LoaderConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !IDENTIFIER.is_match(&self.geometry_column) {
            return Err(Error::config(format!(
                "geometry_column '{}' is not a valid identifier",
                self.geometry_column
            )));
        }
        // Spliced into SQL unquoted, so it must be a bare function name.
        if !IDENTIFIER.is_match(&self.geometry_function) {
            return Err(Error::config(format!(
                "geometry_function '{}' is not a valid function name",
                self.geometry_function
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.geometry_column, "geom");
        assert_eq!(config.geometry_function, "ST_GeomFromGeoJSON");
        assert!(config.load_spatial);
        assert!(!config.install_spatial);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = LoaderConfig::new()
            .with_geometry_column("the_geom")
            .with_install_spatial(true)
            .with_load_spatial(false);
        assert_eq!(config.geometry_column, "the_geom");
        assert!(config.install_spatial);
        assert!(!config.load_spatial);
    }

    #[test]
    fn test_from_yaml_partial_override() {
        let config = LoaderConfig::from_yaml("geometry_column: shape\n").unwrap();
        assert_eq!(config.geometry_column, "shape");
        assert_eq!(config.geometry_function, DEFAULT_GEOMETRY_FUNCTION);
        assert!(config.load_spatial);
    }

    #[test]
    fn test_from_yaml_rejects_bad_identifier() {
        let err = LoaderConfig::from_yaml("geometry_column: \"geo m\"\n").unwrap_err();
        assert!(err.to_string().contains("geometry_column"));

        let err =
            LoaderConfig::from_yaml("geometry_function: \"x); DROP TABLE t; --\"\n").unwrap_err();
        assert!(err.to_string().contains("geometry_function"));
    }

    #[test]
    fn test_from_yaml_malformed_is_config_error() {
        let err = LoaderConfig::from_yaml("load_spatial: [not, a, bool]\n").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "install_spatial: true").unwrap();

        let config = LoaderConfig::from_file(file.path()).unwrap();
        assert!(config.install_spatial);
    }

    #[test]
    fn test_from_missing_file() {
        let err = LoaderConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
