//! CLI commands for data export
//!
//! Writes to a file with `-o`, otherwise to stdout.

use crate::error::{AtlasError, AtlasResult};
use crate::export::{csv, json, yaml};
use crate::services::dashboard::search_customers;
use crate::storage::Storage;
use clap::Subcommand;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the profile as JSON
    Json {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Export the profile as YAML
    Yaml {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export customers to CSV
    CustomersCsv {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only export customers matching this term
        #[arg(short, long)]
        search: Option<String>,
    },
}

fn open_output(output: Option<&Path>) -> AtlasResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                AtlasError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn finish(mut writer: Box<dyn Write>, output: Option<&Path>, what: &str) -> AtlasResult<()> {
    writer
        .flush()
        .map_err(|e| AtlasError::Export(e.to_string()))?;

    if let Some(path) = output {
        eprintln!("{} exported to: {}", what, path.display());
    }
    Ok(())
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> AtlasResult<()> {
    match cmd {
        ExportCommands::Json { output, compact } => {
            let mut writer = open_output(output.as_deref())?;
            json::export_profile_json(storage, &mut writer, !compact)?;
            writeln!(writer).map_err(|e| AtlasError::Export(e.to_string()))?;
            finish(writer, output.as_deref(), "Profile")
        }
        ExportCommands::Yaml { output } => {
            let mut writer = open_output(output.as_deref())?;
            yaml::export_profile_yaml(storage, &mut writer)?;
            finish(writer, output.as_deref(), "Profile")
        }
        ExportCommands::CustomersCsv { output, search } => {
            let customers = search_customers(search.as_deref().unwrap_or(""));
            let mut writer = open_output(output.as_deref())?;
            csv::export_customers_csv(&customers, &mut writer)?;
            finish(writer, output.as_deref(), &format!("{} customers", customers.len()))
        }
    }
}
