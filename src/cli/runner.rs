//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::LoaderConfig;
use crate::database::{database_exists, ensure_duckdb_extension, DuckDbStore};
use crate::error::{Error, Result, ResultExt};
use crate::loader::{GeoJsonLoader, LoadReport};
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Init { database } => self.init(database, &config),
            Commands::Load { geojson, db, table } => {
                let report = self.load(geojson, db, table.as_deref(), &config)?;
                print!("{}", load_summary(&report, &ensure_duckdb_extension(db)));
                Ok(())
            }
        }
    }

    /// Loader configuration from `--config`, or the defaults
    fn load_config(&self) -> Result<LoaderConfig> {
        let config = match &self.cli.config {
            Some(path) => LoaderConfig::from_file(path)?,
            None => LoaderConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Create or open a database and install the spatial extension
    ///
    /// The extension is then loaded once unless `load_spatial` is off.
    fn init(&self, database: &str, config: &LoaderConfig) -> Result<()> {
        let path = ensure_duckdb_extension(database);

        if database_exists(&path) {
            println!("Opening existing database: {path}");
        } else {
            println!("Creating new database: {path}");
        }

        let store = DuckDbStore::open(&path)?;

        println!("Installing spatial extension...");
        store
            .install_spatial()
            .with_context(|| format!("Failed to initialize database '{path}'"))?;
        if config.load_spatial {
            store
                .load_spatial()
                .with_context(|| format!("Failed to initialize database '{path}'"))?;
        }

        println!("\n✓ Database ready with spatial extension at: {path}");
        Ok(())
    }

    /// Load one GeoJSON file into an existing database
    fn load(
        &self,
        geojson: &Path,
        db: &str,
        table: Option<&str>,
        config: &LoaderConfig,
    ) -> Result<LoadReport> {
        if !geojson.is_file() {
            return Err(Error::file_not_found(geojson));
        }

        let path = ensure_duckdb_extension(db);
        if !database_exists(&path) {
            return Err(Error::connection(format!(
                "database not found: {path}\nHint: Run 'xyzduck init {db}' to create it"
            )));
        }

        let store = DuckDbStore::open_with_config(&path, config)?;
        GeoJsonLoader::new(config.clone()).load(geojson, table, &store)
    }
}

/// Summary of a finished load, as printed by `load`
fn load_summary(report: &LoadReport, database: &str) -> String {
    let mut summary = if report.created {
        format!("Created table '{}' in {database}\n", report.table)
    } else {
        format!("Appended to existing table '{}' in {database}\n", report.table)
    };
    summary.push_str(&format!("✓ {report}\n"));
    if !report.columns.is_empty() {
        summary.push_str(&format!(
            "\nTable: {}\nColumns: {}\n",
            report.table,
            report.column_summary()
        ));
    }
    summary
}
