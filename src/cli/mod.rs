//! CLI module
//!
//! Command-line interface for loading GeoJSON into DuckDB.
//!
//! # Commands
//!
//! - `init` - Create a database with the spatial extension installed
//! - `load` - Load a GeoJSON file into a table

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
