//! GeoJSON loader module
//!
//! Turns a GeoJSON FeatureCollection into rows of a DuckDB table.
//!
//! # Overview
//!
//! The loader module provides:
//! - `GeoJsonLoader` / `load` - create-or-append orchestration
//! - `LoadPlan` - the single bulk `INSERT … SELECT` statement
//! - Table name derivation from file names

mod naming;
mod pipeline;
mod plan;
mod types;

pub use naming::{
    normalize_table_name, resolve_table_name, table_name_from_path, validate_table_name,
};
pub use pipeline::{load, GeoJsonLoader};
pub use plan::LoadPlan;
pub use types::LoadReport;
