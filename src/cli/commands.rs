//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Load GeoJSON into DuckDB spatial tables
#[derive(Parser, Debug)]
#[command(name = "xyzduck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Loader configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a database (or open an existing one) and install the spatial extension
    Init {
        /// Database file (`.duckdb` is appended when missing)
        database: String,
    },

    /// Load a GeoJSON file into a table, appending if the table exists
    Load {
        /// GeoJSON FeatureCollection file
        geojson: PathBuf,

        /// Target database file (created with `init`)
        #[arg(long)]
        db: String,

        /// Table name (default: derived from the file name)
        #[arg(long)]
        table: Option<String>,
    },
}
