//! Show command implementation.
//!
//! Prints the effective value of every flag in the target release, sorted
//! by flag name.

use crate::error::CliError;
use crate::utils::{load_configs, target_release, GlobalOptions};
use clap::{Args, ValueEnum};
use relconfig::{ResolvedRelease, Settings, Value};
use std::io::Write;

/// Show the effective flag values of the target release.
#[derive(Args)]
pub struct ShowCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "human", ignore_case = true)]
    pub format: ShowFormat,
}

/// Output format for the show command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ShowFormat {
    /// One `NAME=value` line per flag
    Human,
    /// JSON object
    Json,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (settings, configs) = load_configs(global, Settings::default())?;
        let release = configs.resolve(target_release(&settings))?;

        match self.format {
            ShowFormat::Human => format_as_human(&release),
            ShowFormat::Json => format_as_json(&release),
        }
    }
}

fn format_as_human(release: &ResolvedRelease) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    for (name, flag) in release.flags() {
        writeln!(handle, "{name}={}", flag.value())?;
    }

    Ok(())
}

fn json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Unspecified => serde_json::Value::Null,
    }
}

fn format_as_json(release: &ResolvedRelease) -> Result<(), CliError> {
    let flags: serde_json::Map<String, serde_json::Value> = release
        .flags()
        .iter()
        .map(|(name, flag)| (name.clone(), json_value(flag.value())))
        .collect();

    let output = serde_json::json!({
        "name": release.name(),
        "other_names": release.other_names(),
        "flags": flags,
    });

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::InvalidArguments(format!("JSON serialization failed: {e}")))?;
    println!("{json}");

    Ok(())
}
