//! Error types for xyzduck
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for xyzduck
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Input Errors
    // ============================================================================
    #[error("Invalid input: {message}")]
    Input { message: String },

    #[error("GeoJSON file '{path}' contains no features")]
    EmptySource { path: PathBuf },

    // ============================================================================
    // Storage Errors
    // ============================================================================
    #[error("Storage connection failed: {message}")]
    Connection { message: String },

    #[error("Schema conflict for table '{table}': {message}")]
    SchemaConflict { table: String, message: String },

    #[error("Failed to load '{path}' into table '{table}': {message}")]
    Load {
        path: PathBuf,
        table: String,
        message: String,
    },

    #[error("DuckDB error: {0}")]
    Database(#[from] duckdb::Error),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // File Errors
    // ============================================================================
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`], matching the load pipeline's
/// failure taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    EmptySource,
    Connection,
    SchemaConflict,
    Load,
    Config,
    Other,
}

impl Error {
    /// Create an input error
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Create an empty source error
    pub fn empty_source(path: impl AsRef<Path>) -> Self {
        Self::EmptySource {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a schema conflict error
    pub fn schema_conflict(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaConflict {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a load error
    pub fn load(
        path: impl AsRef<Path>,
        table: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Load {
            path: path.as_ref().to_path_buf(),
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl AsRef<Path>) -> Self {
        Self::FileNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Input { .. } | Error::FileNotFound { .. } => ErrorKind::Input,
            Error::EmptySource { .. } => ErrorKind::EmptySource,
            Error::Connection { .. } | Error::Database(_) => ErrorKind::Connection,
            Error::SchemaConflict { .. } => ErrorKind::SchemaConflict,
            Error::Load { .. } => ErrorKind::Load,
            Error::Config { .. } | Error::YamlParse(_) => ErrorKind::Config,
            Error::Other(_) => ErrorKind::Other,
        }
    }
}

/// Result type alias for xyzduck
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
