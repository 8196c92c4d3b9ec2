//! Releases command implementation.
//!
//! Lists every release with its alternate names and declared inheritance,
//! sorted by name.

use crate::error::CliError;
use crate::utils::{load_configs, GlobalOptions};
use clap::{Args, ValueEnum};
use relconfig::{ReleaseConfig, Settings};
use serde::Serialize;
use std::io::Write;

/// Column headers for table output.
const COLUMN_HEADERS: [&str; 3] = ["name", "other_names", "inherits"];

/// List releases with their alternate names and inheritance.
#[derive(Args)]
pub struct ReleasesCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: ReleasesFormat,
}

/// Output format for the releases command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ReleasesFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
}

/// One row of the listing.
#[derive(Serialize)]
struct ReleaseRow {
    name: String,
    other_names: Vec<String>,
    inherits: Vec<String>,
}

impl From<&ReleaseConfig> for ReleaseRow {
    fn from(release: &ReleaseConfig) -> Self {
        let mut inherits: Vec<String> = Vec::new();
        for name in release.inherits() {
            if !inherits.iter().any(|n| n == name) {
                inherits.push(name.to_string());
            }
        }
        Self {
            name: release.name.clone(),
            other_names: release.other_names.clone(),
            inherits,
        }
    }
}

impl ReleasesCommand {
    /// Execute the releases command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_settings, configs) = load_configs(global, Settings::default())?;
        let rows: Vec<ReleaseRow> = configs.releases().iter().map(ReleaseRow::from).collect();

        match self.format {
            ReleasesFormat::Table => format_as_table(&rows),
            ReleasesFormat::Json => format_as_json(&rows),
        }
    }
}

fn format_as_table(rows: &[ReleaseRow]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for row in rows {
        writeln!(
            handle,
            "{}\t{}\t{}",
            row.name,
            row.other_names.join(","),
            row.inherits.join(",")
        )?;
    }

    Ok(())
}

fn format_as_json(rows: &[ReleaseRow]) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(rows)
        .map_err(|e| CliError::InvalidArguments(format!("JSON serialization failed: {e}")))?;
    println!("{json}");
    Ok(())
}
