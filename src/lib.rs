// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # xyzduck
//!
//! Load GeoJSON FeatureCollections into DuckDB tables with a `GEOMETRY`
//! column, inferring the table schema from the first feature.
//!
//! ## Features
//!
//! - **Schema Inference**: Column types from the first feature's properties
//! - **Create or Append**: New tables are created, existing ones appended to
//! - **Single Statement Load**: DuckDB reads and unnests the file itself
//! - **Spatial Geometry**: Geometries parsed by the `spatial` extension
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use xyzduck::{load, DuckDbStore, Result};
//!
//! fn main() -> Result<()> {
//!     let store = DuckDbStore::open("maps.duckdb")?;
//!     store.load_spatial()?;
//!
//!     // Table name derived from the file name: "cities"
//!     let report = load("data/cities.geojson", None, &store)?;
//!     println!("{report}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        GeoJsonLoader                         │
//! │  resolve table → exists? → [infer + CREATE] → INSERT → report│
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────┬─────────────────┴──────┬─────────────────────────┐
//! │  GeoJSON  │        Schema          │        Database         │
//! ├───────────┼────────────────────────┼─────────────────────────┤
//! │ Parse     │ Type inference         │ SpatialStore trait      │
//! │ Features  │ Column ordering        │ DuckDB + spatial        │
//! │           │ Geometry column        │ Catalog / DDL           │
//! └───────────┴────────────────────────┴─────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Column types and common aliases
pub mod types;

/// Loader configuration
pub mod config;

/// GeoJSON document model and parsing
pub mod geojson;

/// Schema inference from GeoJSON features
pub mod schema;

/// Spatial storage via DuckDB
pub mod database;

/// Load planning and orchestration
pub mod loader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::LoaderConfig;
pub use database::{DuckDbStore, SpatialStore};
pub use error::{Error, ErrorKind, Result};
pub use loader::{load, GeoJsonLoader, LoadReport};
pub use schema::Schema;
pub use types::{Column, ColumnType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
