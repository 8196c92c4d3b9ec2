//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, GenerateCommand, ReleasesCommand, ShowCommand, TraceCommand,
    ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for resolving layered build release configurations.
#[derive(Parser)]
#[command(name = "relconfig")]
#[command(
    version,
    about = "Resolve layered build release configurations",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Release config map file, in precedence order (repeatable)
    #[arg(
        long = "map",
        value_name = "PATH",
        global = true,
        env = "RELCONFIG_MAPS",
        value_delimiter = ':'
    )]
    pub maps: Vec<PathBuf>,

    /// Release to resolve (default: trunk)
    #[arg(long, value_name = "NAME", global = true, env = "TARGET_RELEASE")]
    pub release: Option<String>,

    /// Settings file (default: relconfig.yaml in the working directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve every release and write artifacts
    Generate(GenerateCommand),

    /// Show the effective flag values of the target release
    Show(ShowCommand),

    /// Show where one flag's value came from
    Trace(TraceCommand),

    /// List releases with their alternate names and inheritance
    Releases(ReleasesCommand),

    /// Load and resolve everything, reporting any error
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
